use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Document, Item, Node, Table};
use crate::SigilError;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

/// Check that a single name is a valid SIGIL identifier.
pub fn validate(name: &str) -> Result<(), SigilError> {
    validate_at(name, name)
}

fn validate_at(name: &str, path: &str) -> Result<(), SigilError> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(SigilError::InvalidName {
            name: name.to_string(),
            path: path.to_string(),
            hint: Some("Names must start with a letter or underscore, followed by letters, digits or underscores".into()),
            code: Some(100),
        })
    }
}

/// Validate every key of a table, and of any table nested below it.
/// Fails on the first offender with its dotted path.
pub fn validate_table(table: &Table, path: &str) -> Result<(), SigilError> {
    for (key, value) in &table.entries {
        let full = if path.is_empty() {
            key.clone()
        } else {
            format!("{path}.{key}")
        };
        validate_at(key, &full)?;
        validate_value(value, &full)?;
    }
    Ok(())
}

fn validate_value(value: &Node, path: &str) -> Result<(), SigilError> {
    match value {
        Node::Table(table) => validate_table(table, path),
        Node::Array(items) => {
            for item in items {
                validate_value(item, path)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Validate the whole document before any rendering begins. Dotted top-level
/// keys (`parent.child`) are validated per segment.
pub fn validate_document(doc: &Document) -> Result<(), SigilError> {
    for item in &doc.body {
        if let Item::Entry(key, value) = item {
            for segment in key.split('.') {
                validate_at(segment, key)?;
            }
            validate_value(value, key)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Node;

    #[test]
    fn test_valid_names() {
        for name in ["foo_1", "_private", "Name", "a", "snake_case_2"] {
            assert!(validate(name).is_ok(), "expected '{}' to be valid", name);
        }
    }

    #[test]
    fn test_invalid_names() {
        for name in ["1foo", "foo-bar", "", "with space", "héllo", "2"] {
            assert!(validate(name).is_err(), "expected '{}' to be invalid", name);
        }
    }

    #[test]
    fn test_nested_table_error_carries_path() {
        let mut inner = Table::new();
        inner.insert("2inner", Node::Integer(1));
        let mut outer = Table::new();
        outer.insert("inner", Node::Table(inner));

        let err = validate_table(&outer, "outer").unwrap_err();
        match err {
            SigilError::InvalidName { name, path, .. } => {
                assert_eq!(name, "2inner");
                assert_eq!(path, "outer.inner.2inner");
            }
            other => panic!("Expected InvalidName, got {:?}", other),
        }
    }

    #[test]
    fn test_dotted_key_validated_per_segment() {
        let mut doc = Document::new();
        doc.push_entry("valid.3sub", Node::Table(Table::new()));

        let err = validate_document(&doc).unwrap_err();
        match err {
            SigilError::InvalidName { name, path, .. } => {
                assert_eq!(name, "3sub");
                assert_eq!(path, "valid.3sub");
            }
            other => panic!("Expected InvalidName, got {:?}", other),
        }
    }

    #[test]
    fn test_table_inside_array_is_checked() {
        let mut bad = Table::new();
        bad.insert("not-ok", Node::Bool(true));
        let mut doc = Document::new();
        doc.push_entry("items", Node::Array(vec![Node::Table(bad)]));

        assert!(validate_document(&doc).is_err());
    }
}
