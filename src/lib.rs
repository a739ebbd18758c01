pub mod ast;
pub mod comments;
pub mod convert;
pub mod error;
pub mod export;
pub mod expr;
pub mod names;
pub mod render;
pub mod sections;

pub use ast::{Document, Item, Node, Table};
pub use convert::convert_document;
pub use error::SigilError;
