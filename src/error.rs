//! Error types for the extraction pipeline

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration (API key, config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// File extension outside the supported set
    #[error("Unsupported file format: {0}")]
    UnsupportedFileType(String),

    /// A file could not be parsed into raw text
    #[error("Failed to parse {filename}: {message}")]
    FileParse { filename: String, message: String },

    /// The extraction response was not a decodable JSON payload
    #[error("Failed to decode extraction response for {context}: {message}\nResponse: {preview}")]
    Decode {
        /// Chunk identity (`doc_id:para_<n>`)
        context: String,
        /// Bounded prefix of the offending response
        preview: String,
        /// Underlying decode error text
        message: String,
    },

    /// LLM call failed for a reason other than decoding
    #[error("LLM call failed: {0}")]
    Llm(String),

    /// Spreadsheet or CSV output could not be produced
    #[error("Export failed: {0}")]
    Export(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a file parse error
    pub fn file_parse(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileParse {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Create a decode error, truncating the response to a bounded preview
    pub fn decode(context: impl Into<String>, response: &str, message: impl Into<String>) -> Self {
        Self::Decode {
            context: context.into(),
            preview: truncate_chars(response, 500),
            message: message.into(),
        }
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max).collect();
        out.push_str("...");
        out
    }
}
