// License: MIT

use indexmap::IndexMap;

use crate::ast::{Document, Item, Node};
use crate::comments;

/// Name of the pseudo-section holding top-level entries.
pub const ROOT_SECTION: &str = "root";

/// One item inside a collected section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionItem {
    KeyValue(String, Node),
    Comment(String),
}

/// Partition the document body into named sections, preserving first-seen
/// order throughout.
///
/// - Non-table entries land in `root`.
/// - A comment follows the section currently being populated.
/// - A table keyed `name` opens (or reuses) section `name` and is flattened
///   one level into it; deeper nesting stays a `Node::Table` value.
/// - A table keyed `parent.child` is filed whole as item `child` inside the
///   `parent` section.
///
/// Adjacent comment runs are merged per section afterwards.
pub fn collect(doc: &Document) -> IndexMap<String, Vec<SectionItem>> {
    let mut sections: IndexMap<String, Vec<SectionItem>> = IndexMap::new();
    let mut current = ROOT_SECTION.to_string();

    for item in &doc.body {
        match item {
            Item::Comment(text) => {
                sections
                    .entry(current.clone())
                    .or_default()
                    .push(SectionItem::Comment(text.clone()));
            }
            Item::Entry(key, Node::Table(table)) => {
                if let Some((parent, child)) = key.split_once('.') {
                    current = parent.to_string();
                    let bucket = sections.entry(parent.to_string()).or_default();
                    if let Some(comment) = &table.comment {
                        bucket.push(SectionItem::Comment(comment.clone()));
                    }
                    bucket.push(SectionItem::KeyValue(
                        child.to_string(),
                        Node::Table(table.clone()),
                    ));
                } else {
                    current = key.clone();
                    let bucket = sections.entry(key.clone()).or_default();
                    if let Some(comment) = &table.comment {
                        bucket.push(SectionItem::Comment(comment.clone()));
                    }
                    for (k, v) in &table.entries {
                        bucket.push(SectionItem::KeyValue(k.clone(), v.clone()));
                    }
                }
            }
            Item::Entry(key, value) => {
                sections
                    .entry(ROOT_SECTION.to_string())
                    .or_default()
                    .push(SectionItem::KeyValue(key.clone(), value.clone()));
            }
        }
    }

    for items in sections.values_mut() {
        *items = comments::merge(std::mem::take(items));
    }
    sections
}
