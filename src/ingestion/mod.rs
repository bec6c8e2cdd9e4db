//! Document ingestion: raw text readers, normalization, and chunking

mod chunker;
mod normalizer;
mod parser;

pub use chunker::ParagraphChunker;
pub use normalizer::normalize;
pub use parser::{FileParser, FileType};
