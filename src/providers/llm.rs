//! LLM provider trait for chunk extraction

use async_trait::async_trait;

use crate::error::Result;

/// Trait for LLM-backed record extraction.
///
/// Implementations return the model's raw text; the orchestrator strips
/// code fences and decodes the JSON payload. Timeout and retry policy
/// belong to the implementation, not to the orchestrator.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one generation call with a system instruction and user prompt
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;

    /// Check if the provider is reachable with valid credentials
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model being used
    fn model(&self) -> &str;
}
