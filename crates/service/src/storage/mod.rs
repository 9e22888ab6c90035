//! Storage abstractions for service layer
//!
//! Whole-document JSON persistence: every operation reads the complete
//! backing file and every write replaces it.

pub mod json_document;
pub mod json_collection;

pub use json_collection::JsonCollection;
pub use json_document::{Document, DocumentError, DocumentLayout, Entry};
