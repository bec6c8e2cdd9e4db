//! Drives one extraction call per chunk and validates the responses

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::extraction::observer::{ExtractionObserver, TracingObserver};
use crate::extraction::prompt;
use crate::providers::LlmProvider;
use crate::types::{Chunk, ExtractionRecord, Provenance};

/// Orchestrates record extraction across the chunks of a document.
///
/// Exactly one provider call is made per chunk; retries, if any, belong to
/// the provider. A decodable but empty or mis-shaped payload contributes
/// zero records and a warning. An undecodable payload is a hard failure
/// that aborts the remaining chunks; callers needing partial-failure
/// tolerance must catch per chunk.
pub struct ExtractionOrchestrator {
    provider: Arc<dyn LlmProvider>,
    observer: Arc<dyn ExtractionObserver>,
}

impl ExtractionOrchestrator {
    pub fn new(provider: Arc<dyn LlmProvider>, observer: Arc<dyn ExtractionObserver>) -> Self {
        Self { provider, observer }
    }

    /// Create an orchestrator with the default tracing-backed observer
    pub fn with_provider(provider: Arc<dyn LlmProvider>) -> Self {
        Self::new(provider, Arc::new(TracingObserver))
    }

    /// Extract records from chunks in order, appending each chunk's records
    /// in the order the provider returned them. No re-sorting by key or
    /// confidence.
    pub async fn extract(
        &self,
        chunks: &[Chunk],
        priority_keys: Option<&[String]>,
    ) -> Result<Vec<ExtractionRecord>> {
        let mut records = Vec::new();
        for chunk in chunks {
            records.extend(self.extract_chunk(chunk, priority_keys).await?);
        }
        Ok(records)
    }

    async fn extract_chunk(
        &self,
        chunk: &Chunk,
        priority_keys: Option<&[String]>,
    ) -> Result<Vec<ExtractionRecord>> {
        self.observer.chunk_started(chunk);

        let user_prompt = prompt::build_user_prompt(chunk, priority_keys);
        let raw = self
            .provider
            .generate(prompt::SYSTEM_PROMPT, &user_prompt)
            .await?;
        let payload = strip_code_fence(&raw);

        // An undecodable payload is a hard error with enough context to
        // diagnose; a decodable payload that is not a record array is not.
        let value: serde_json::Value = serde_json::from_str(payload)
            .map_err(|e| Error::decode(chunk.identity(), payload, e.to_string()))?;

        let mut parsed: Vec<ExtractionRecord> = match serde_json::from_value(value) {
            Ok(records) => records,
            Err(_) => {
                self.observer
                    .empty_extraction(chunk, &chunk_preview(chunk));
                return Ok(Vec::new());
            }
        };

        if parsed.is_empty() {
            self.observer
                .empty_extraction(chunk, &chunk_preview(chunk));
            return Ok(Vec::new());
        }

        for record in &mut parsed {
            backfill_provenance(record, chunk);
        }

        self.observer.records_extracted(chunk, parsed.len());
        Ok(parsed)
    }
}

/// Fill in provenance for a record the model returned without one, or with
/// one that does not match the `doc_id:paragraph_index:start-end` shape.
fn backfill_provenance(record: &mut ExtractionRecord, chunk: &Chunk) {
    let well_formed = record
        .provenance
        .as_deref()
        .map(|p| p.parse::<Provenance>().is_ok())
        .unwrap_or(false);

    if !well_formed {
        record.provenance = Some(
            Provenance::whole_chunk(chunk.doc_id.clone(), chunk.paragraph_index, chunk.char_len())
                .to_string(),
        );
    }
}

/// Strip a surrounding Markdown code fence (with optional `json` tag) from
/// a model response.
fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    match text.strip_prefix("```") {
        Some(rest) => {
            let inner = match rest.split_once("```") {
                Some((inner, _)) => inner,
                None => rest,
            };
            inner.strip_prefix("json").unwrap_or(inner).trim()
        }
        None => text,
    }
}

fn chunk_preview(chunk: &Chunk) -> String {
    chunk.text.chars().take(200).collect()
}
