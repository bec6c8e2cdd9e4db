//! Extraction record and output row types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::DocId;

/// A record as returned by the extraction model for one chunk.
///
/// Every field is optional at the decode layer: the model contract asks for
/// all of them, but responses are accepted as long as the payload is a JSON
/// array of objects. Defaults are applied at projection time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionRecord {
    /// Canonical name for the data point
    #[serde(default)]
    pub key: Option<String>,
    /// Extracted value; an ambiguous value carries both candidates joined
    /// by a literal `" | "` separator
    #[serde(default)]
    pub value: Option<String>,
    /// Exact substring from the input that supports this pair
    #[serde(default)]
    pub raw_value: Option<String>,
    /// Contextual commentary (non-empty by contract)
    #[serde(default)]
    pub comments: Option<String>,
    /// Locator string `doc_id:paragraph_index:char_start-char_end`
    #[serde(default)]
    pub provenance: Option<String>,
    /// Model confidence in [0.0, 1.0]
    #[serde(default)]
    pub confidence: Option<f64>,
}

/// Compact locator tying an extracted fact back to its document, paragraph,
/// and character span. String form is `<doc_id>:<paragraph_index>:<start>-<end>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub doc_id: DocId,
    pub paragraph_index: usize,
    pub char_start: usize,
    pub char_end: usize,
}

impl Provenance {
    /// Default provenance for a record the model returned without one:
    /// the whole chunk.
    pub fn whole_chunk(doc_id: DocId, paragraph_index: usize, chunk_chars: usize) -> Self {
        Self {
            doc_id,
            paragraph_index,
            char_start: 0,
            char_end: chunk_chars,
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}-{}",
            self.doc_id, self.paragraph_index, self.char_start, self.char_end
        )
    }
}

impl FromStr for Provenance {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let doc_id = parts.next().filter(|p| !p.is_empty()).ok_or(())?;
        let paragraph_index = parts.next().and_then(|p| p.parse().ok()).ok_or(())?;
        let span = parts.next().ok_or(())?;
        let (start, end) = span.split_once('-').ok_or(())?;
        Ok(Self {
            doc_id: DocId::from(doc_id),
            paragraph_index,
            char_start: start.parse().map_err(|_| ())?,
            char_end: end.parse().map_err(|_| ())?,
        })
    }
}

/// One row of the final tabular output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub key: String,
    pub value: String,
    pub comments: String,
    /// Originating file; used for grouping and statistics, exported only
    /// when the writer is asked for it
    pub source_file: String,
}
