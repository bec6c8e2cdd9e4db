//! Provider abstraction for the external extraction capability
//!
//! The LLM call is a single function-shaped seam (prompt in, raw model text
//! out) so any compliant text-understanding backend can be substituted
//! without altering chunking or projection logic.

pub mod gemini;
pub mod llm;

pub use gemini::GeminiClient;
pub use llm::LlmProvider;
