//! Observer interface for extraction progress and warnings
//!
//! Injected into the orchestrator instead of relying on process-wide
//! logging configuration; the default implementation forwards to `tracing`.

use crate::types::Chunk;

/// Receives per-chunk events during an extraction pass
pub trait ExtractionObserver: Send + Sync {
    /// A chunk is about to be submitted for extraction
    fn chunk_started(&self, chunk: &Chunk);

    /// A chunk produced `count` records
    fn records_extracted(&self, chunk: &Chunk, count: usize);

    /// A chunk produced an empty or malformed (but decodable) response;
    /// `preview` is a bounded prefix of the chunk text
    fn empty_extraction(&self, chunk: &Chunk, preview: &str);
}

/// Default observer backed by `tracing`
pub struct TracingObserver;

impl ExtractionObserver for TracingObserver {
    fn chunk_started(&self, chunk: &Chunk) {
        tracing::debug!("Extracting {} ({} chars)", chunk.identity(), chunk.char_len());
    }

    fn records_extracted(&self, chunk: &Chunk, count: usize) {
        tracing::debug!("{}: {} record(s)", chunk.identity(), count);
    }

    fn empty_extraction(&self, chunk: &Chunk, preview: &str) {
        tracing::warn!(
            "Empty or invalid extraction for {}. Text preview: {}...",
            chunk.identity(),
            preview
        );
    }
}
