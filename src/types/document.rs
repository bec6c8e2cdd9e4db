//! Document and chunk types with position tracking

use serde::{Deserialize, Serialize};
use std::fmt;

/// Short document identifier (`D1`, `D2`, ...), assigned per source file
/// in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    /// Create the id for the `n`-th uploaded source (1-based)
    pub fn from_ordinal(n: usize) -> Self {
        Self(format!("D{}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A source document after text extraction and normalization
#[derive(Debug, Clone)]
pub struct Document {
    /// Document identifier
    pub id: DocId,
    /// Original filename as uploaded (metadata only, not used in chunking)
    pub source_file: String,
    /// Normalized text body
    pub text: String,
}

impl Document {
    pub fn new(id: DocId, source_file: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            source_file: source_file.into(),
            text: text.into(),
        }
    }
}

/// A contiguous, paragraph-aligned slice of a document's normalized text,
/// submitted as one extraction unit. Ephemeral: not persisted beyond one
/// extraction pass.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Chunk text, whole paragraphs joined by a blank line
    pub text: String,
    /// Owning document
    pub doc_id: DocId,
    /// Index of the first paragraph the chunk contains (0-based)
    pub paragraph_index: usize,
    /// Running character count from document start when the chunk was opened
    pub char_offset: usize,
}

impl Chunk {
    /// Chunk identity for diagnostics (`D1:para_3`)
    pub fn identity(&self) -> String {
        format!("{}:para_{}", self.doc_id, self.paragraph_index)
    }

    /// Chunk length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
