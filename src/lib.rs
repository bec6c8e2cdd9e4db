//! textab: text-to-spreadsheet extraction pipeline
//!
//! Converts free-form document text (.txt, .docx, .pdf) into a normalized
//! tabular record set (key, value, comments) via LLM extraction, ready for
//! Excel or CSV export.

pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod ingestion;
pub mod pipeline;
pub mod projection;
pub mod providers;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use pipeline::{ExtractionPipeline, SourceFile};
pub use types::{Chunk, DocId, Document, ExtractionRecord, OutputRow, Provenance};
