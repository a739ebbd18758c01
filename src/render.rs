use crate::ast::{Node, Table};
use crate::SigilError;

const INDENT_STEP: usize = 4;

/// Render a single value as SIGIL text at the given indent level.
///
/// Pure: the same node always renders to the same string. Indentation only
/// affects tables, which open inline and close at the caller's indent.
pub fn render(node: &Node, indent: usize) -> Result<String, SigilError> {
    match node {
        Node::String(s) => render_string(s),
        Node::Integer(i) => Ok(i.to_string()),
        Node::Float(x) => Ok(x.to_string()),
        Node::Bool(b) => Ok(b.to_string()),
        Node::Table(table) => render_table(table, indent),
        Node::Array(items) => {
            let rendered = items
                .iter()
                .map(|item| render(item, indent))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("[{}]", rendered.join(", ")))
        }
    }
}

/// Strings become raw literals: `@"..."` with every `"` doubled.
///
/// The unbalanced-quote check is defensive; a conforming parser never hands
/// us a string it could not itself terminate.
fn render_string(s: &str) -> Result<String, SigilError> {
    let mut unescaped = 0usize;
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '"' {
            if chars.peek() == Some(&'"') {
                chars.next();
            } else {
                unescaped += 1;
            }
        }
    }
    if unescaped % 2 == 1 {
        return Err(SigilError::UnterminatedString {
            text: s.to_string(),
            hint: Some("Double a literal quote to escape it".into()),
            code: Some(301),
        });
    }
    Ok(format!("@\"{}\"", s.replace('"', "\"\"")))
}

fn render_table(table: &Table, indent: usize) -> Result<String, SigilError> {
    if table.entries.is_empty() {
        return Ok("{}".to_string());
    }
    let inner = indent + INDENT_STEP;
    let pad = " ".repeat(inner);
    let mut lines = Vec::with_capacity(table.entries.len());
    for (key, value) in &table.entries {
        lines.push(format!("{pad}{key} : {}", render(value, inner)?));
    }
    Ok(format!("{{\n{}\n{}}}", lines.join(",\n"), " ".repeat(indent)))
}
