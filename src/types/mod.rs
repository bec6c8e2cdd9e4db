//! Core data types for documents, chunks, and extraction records

pub mod document;
pub mod record;

pub use document::{Chunk, DocId, Document};
pub use record::{ExtractionRecord, OutputRow, Provenance};
