//! Storage layer: the JSON document model and the file-backed store

pub mod document;
pub mod store;

pub use document::{Document, EntityKind, EntityRecord, EntityRef};
pub use store::{read_document, write_document_atomic, Store};
