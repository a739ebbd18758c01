use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single value in the source document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Table(Table),
    Array(Vec<Node>),
}

/// An ordered table of key → value entries, plus the comment the parser
/// attached to the table header, if any.
///
/// Entry order is insertion order and is preserved end-to-end; the parser
/// guarantees the key set has no duplicates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub entries: Vec<(String, Node)>,
    pub comment: Option<String>,
}

/// One top-level item of the document body, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Entry(String, Node),
    Comment(String),
}

/// The parsed source document handed to the converter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub body: Vec<Item>,
}

impl Node {
    pub fn as_table(&self) -> Option<&Table> {
        if let Node::Table(table) = self {
            Some(table)
        } else {
            None
        }
    }
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Node) {
        self.entries.push((key.into(), value));
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_entry(&mut self, key: impl Into<String>, value: Node) {
        self.body.push(Item::Entry(key.into(), value));
    }

    pub fn push_comment(&mut self, text: impl Into<String>) {
        self.body.push(Item::Comment(text.into()));
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::String(s) => serializer.serialize_str(s),
            Node::Integer(i) => serializer.serialize_i64(*i),
            Node::Float(x) => serializer.serialize_f64(*x),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Table(table) => table.serialize(serializer),
            Node::Array(items) => items.serialize(serializer),
        }
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Entry order is significant, so serialize as an ordered map.
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
