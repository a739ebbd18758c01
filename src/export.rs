// License: MIT

use serde_json::json;

use crate::ast::{Document, Item, Node, Table};
use crate::SigilError;

/// Export a document tree to JSON, before any SIGIL conversion.
///
/// The body exports as an array of entries so document order, interleaved
/// comments, and duplicate-free structure all survive:
///
/// ```text
/// [
///   {"comment":"# note"},
///   {"key":"port","value":8000}
/// ]
/// ```
///
/// Scalars and arrays map to their JSON equivalents; tables export as
/// `{"entries": {...}, "comment": ...}` with entries in insertion order.
pub fn export_document_to_json(doc: &Document) -> Result<String, SigilError> {
    fn table_entry(table: &Table) -> serde_json::Value {
        match &table.comment {
            Some(comment) => json!({ "entries": table, "comment": comment }),
            None => json!({ "entries": table }),
        }
    }

    fn node_to_json(node: &Node) -> serde_json::Value {
        match node {
            Node::Table(table) => table_entry(table),
            other => json!(other),
        }
    }

    let mut body: Vec<serde_json::Value> = Vec::new();
    for item in &doc.body {
        match item {
            Item::Entry(key, value) => {
                body.push(json!({ "key": key, "value": node_to_json(value) }));
            }
            Item::Comment(text) => body.push(json!({ "comment": text })),
        }
    }

    Ok(serde_json::to_string_pretty(&serde_json::Value::Array(body)).unwrap())
}
