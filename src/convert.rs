// License: MIT

use std::collections::HashMap;

use crate::ast::{Document, Item, Node};
use crate::expr::{self, VarEnv};
use crate::names;
use crate::render::render;
use crate::sections::{self, SectionItem, ROOT_SECTION};
use crate::SigilError;

/// Convert a parsed document into SIGIL text.
///
/// Runs the full pipeline, each step short-circuiting on failure: variable
/// collection, expression resolution, name validation, section collection
/// (with comment merging), then emission. On any error no output is
/// produced. Each call owns its own state, so independent documents may be
/// converted in parallel.
pub fn convert_document(doc: &Document) -> Result<String, SigilError> {
    let vars = build_environment(doc)?;
    names::validate_document(doc)?;
    let mut sections = sections::collect(doc);

    let mut lines: Vec<String> = Vec::new();

    // The root pseudo-section always leads, wherever it was created.
    if let Some(items) = sections.shift_remove(ROOT_SECTION) {
        for item in items {
            match item {
                SectionItem::Comment(text) => lines.push(text),
                SectionItem::KeyValue(key, node) => {
                    let node = substitute(&key, node, &vars);
                    lines.push(format!("{key} = {};", render(&node, 0)?));
                }
            }
        }
    }

    for (name, items) in &sections {
        if items.is_empty() {
            continue;
        }
        lines.push(format!("{name} = {{"));
        for item in items {
            match item {
                SectionItem::Comment(text) => lines.push(format!("    {text}")),
                SectionItem::KeyValue(key, node) => {
                    lines.push(format!("    {key} : {}", render(node, 4)?));
                }
            }
        }
        lines.push("};".to_string());
    }

    Ok(lines.join("\n"))
}

/// Build the variable environment in two passes: literals first, then
/// expression-valued entries evaluated against the literal snapshot only.
/// Expressions never see each other's results.
fn build_environment(doc: &Document) -> Result<VarEnv, SigilError> {
    let mut vars: VarEnv = HashMap::new();
    for item in &doc.body {
        if let Item::Entry(key, value) = item {
            match value {
                Node::String(_) | Node::Integer(_) | Node::Float(_) => {
                    vars.insert(key.clone(), value.clone());
                }
                _ => {}
            }
        }
    }

    let mut evaluated: Vec<(String, Node)> = Vec::new();
    for item in &doc.body {
        if let Item::Entry(key, Node::String(text)) = item {
            if let Some(value) = expr::evaluate(text, &vars)? {
                evaluated.push((key.clone(), value));
            }
        }
    }
    for (key, value) in evaluated {
        vars.insert(key, value);
    }
    Ok(vars)
}

/// Swap an expression-valued entry for its evaluated form at emission time.
fn substitute(key: &str, node: Node, vars: &VarEnv) -> Node {
    if let Node::String(text) = &node {
        if expr::is_expression(text) {
            if let Some(resolved) = vars.get(key) {
                return resolved.clone();
            }
        }
    }
    node
}
