//! End-to-end pipeline: read, normalize, chunk, extract, project

use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::Result;
use crate::extraction::{ExtractionObserver, ExtractionOrchestrator, TracingObserver};
use crate::ingestion::{normalize, FileParser, ParagraphChunker};
use crate::projection::project;
use crate::providers::LlmProvider;
use crate::types::{DocId, Document, OutputRow};

/// One uploaded source file
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Filename as uploaded, used for format detection and row metadata
    pub name: String,
    /// Raw file bytes
    pub data: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Drives the full extraction pipeline over a batch of files.
///
/// Documents are processed one at a time in upload order, and each
/// document's chunks are extracted sequentially, so rows stay grouped by
/// document and ordered by chunk. No state is shared between documents.
pub struct ExtractionPipeline {
    chunker: ParagraphChunker,
    orchestrator: ExtractionOrchestrator,
}

impl ExtractionPipeline {
    pub fn new(config: &AppConfig, provider: Arc<dyn LlmProvider>) -> Self {
        Self::with_observer(config, provider, Arc::new(TracingObserver))
    }

    pub fn with_observer(
        config: &AppConfig,
        provider: Arc<dyn LlmProvider>,
        observer: Arc<dyn ExtractionObserver>,
    ) -> Self {
        Self {
            chunker: ParagraphChunker::from_config(&config.chunking),
            orchestrator: ExtractionOrchestrator::new(provider, observer),
        }
    }

    /// Process all files in order, accumulating one combined row sequence.
    ///
    /// Document ids `D1`, `D2`, ... are assigned in processing order. A
    /// hard error on any file aborts the run.
    pub async fn run(
        &self,
        files: &[SourceFile],
        priority_keys: Option<&[String]>,
    ) -> Result<Vec<OutputRow>> {
        let mut rows = Vec::new();
        for (idx, file) in files.iter().enumerate() {
            let document = self.load(DocId::from_ordinal(idx + 1), file)?;
            rows.extend(self.process(&document, priority_keys).await?);
        }
        Ok(rows)
    }

    /// Read one file into a normalized document
    pub fn load(&self, id: DocId, file: &SourceFile) -> Result<Document> {
        let raw_text = FileParser::parse(&file.name, &file.data)?;
        tracing::info!("{}: read {} ({} bytes)", id, file.name, file.data.len());
        Ok(Document::new(id, file.name.clone(), normalize(&raw_text)))
    }

    /// Chunk, extract, and project a single document
    pub async fn process(
        &self,
        document: &Document,
        priority_keys: Option<&[String]>,
    ) -> Result<Vec<OutputRow>> {
        let chunks = self.chunker.chunk(&document.text, &document.id);
        tracing::info!("{}: {} chunk(s)", document.id, chunks.len());

        let records = self.orchestrator.extract(&chunks, priority_keys).await?;
        Ok(project(records, &document.source_file))
    }
}
