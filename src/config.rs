//! Configuration for the extraction pipeline

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Environment variable consulted for the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// LLM configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| Error::config(format!("Invalid config file {}: {}", path.display(), e)))
    }
}

/// LLM (Gemini) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key; falls back to the `GEMINI_API_KEY` environment variable
    #[serde(default)]
    pub api_key: Option<String>,
    /// Generation model name
    pub model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum output tokens per call
    pub max_output_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash-lite".to_string(),
            temperature: 0.1, // Low for deterministic, grounded extraction
            max_output_tokens: 4096,
            timeout_secs: 120,
        }
    }
}

impl LlmConfig {
    /// Resolve the API key from config or environment.
    ///
    /// Fails fast before any chunk is processed so a bad credential never
    /// wastes a partial run.
    pub fn resolve_api_key(&self) -> Result<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()))
            .ok_or_else(|| {
                Error::config(format!(
                    "Gemini API key is required. Set {} or pass --api-key.\n\
                     To get a valid API key:\n\
                     1. Go to https://aistudio.google.com/app/apikey\n\
                     2. Create or copy your API key",
                    API_KEY_ENV
                ))
            })
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Number of trailing paragraphs carried into the next chunk
    pub overlap_paragraphs: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 2000,
            overlap_paragraphs: 1,
        }
    }
}

/// Spreadsheet export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Write a header row
    pub include_header: bool,
    /// Auto-adjust column widths to content
    pub auto_width: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_header: true,
            auto_width: true,
        }
    }
}
