//! Gemini client for record extraction via the Generative Language API

use async_trait::async_trait;
use std::time::Duration;

use crate::config::LlmConfig;
use crate::error::{Error, Result};
use crate::providers::llm::LlmProvider;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini client authenticated with an API key
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// Fails before any chunk is processed when no API key is available,
    /// with instructions for obtaining one.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Llm(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", API_BASE, self.model)
    }

    fn invalid_key_error() -> Error {
        Error::config(
            "Invalid Gemini API key. Please check your API key and try again.\n\
             To get a valid API key:\n\
             1. Go to https://aistudio.google.com/app/apikey\n\
             2. Create or copy your API key",
        )
    }
}

#[derive(serde::Serialize)]
struct GenerateRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(serde::Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(serde::Serialize)]
struct Part {
    text: String,
}

#[derive(serde::Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(serde::Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(serde::Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(serde::Deserialize)]
struct ResponsePart {
    text: String,
}

#[async_trait]
impl LlmProvider for GeminiClient {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: system_prompt.to_string(),
                }],
            },
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: user_prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Llm(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if body.contains("API_KEY_INVALID") || body.contains("API key not valid") {
                return Err(Self::invalid_key_error());
            }
            return Err(Error::Llm(format!(
                "Gemini generation failed ({}): {}",
                status, body
            )));
        }

        let gen_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Llm(format!("Failed to parse Gemini response: {}", e)))?;

        gen_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| Error::Llm("No text in Gemini response".to_string()))
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/models/{}", API_BASE, self.model))
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| Error::Llm(format!("Gemini health check failed: {}", e)))?;
        Ok(response.status().is_success())
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
