//! XML input layer
//!
//! The whole document is materialized as an owned [`XmlElement`] tree before
//! any mapping happens; the tree is dropped when the conversion returns.

pub mod element;
pub mod parser;

pub use element::XmlElement;
pub use parser::parse_document;
