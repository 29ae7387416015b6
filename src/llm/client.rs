use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::llm::backend::{BackendError, GenerationBackend, GenerationRequest};
use crate::llm::prompts::{REPAIR_SYSTEM_PROMPT, build_repair_prompt};

/// Configuration for the Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key (from GEMINI_API_KEY env var)
    pub api_key: String,
    /// Model to use (e.g., "gemini-2.5-flash")
    pub model: String,
    /// API base URL
    pub base_url: String,
    /// Maximum tokens in response
    pub max_output_tokens: u32,
    /// Per-request timeout; the backend is a blocking network dependency
    pub request_timeout: Duration,
}

impl GeminiConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY environment variable not set")?;

        Ok(Self::new(api_key, "gemini-2.5-flash".to_string()))
    }

    /// Create with custom settings
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            max_output_tokens: 8192,
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Gemini API client implementing the generation backend.
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// One generateContent call with a structured-output contract.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        temperature: f64,
        response_schema: &Value,
    ) -> Result<String, BackendError> {
        let request = GenerateContentRequest {
            system_instruction: ContentBody {
                role: None,
                parts: vec![Part { text: system }],
            },
            contents: vec![ContentBody {
                role: Some("user"),
                parts: vec![Part { text: user }],
            }],
            generation_config: GenerationConfigBody {
                temperature,
                max_output_tokens: self.config.max_output_tokens,
                response_mime_type: "application/json",
                response_schema,
            },
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api { status, body });
        }

        let response: GenerateContentResponse = response.json().await?;
        let text = extract_text(response)?;

        debug!("backend returned {} chars", text.len());
        Ok(text)
    }
}

impl GenerationBackend for GeminiClient {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, BackendError> {
        self.complete(
            request.system,
            request.user,
            request.temperature,
            request.response_schema,
        )
        .await
    }

    async fn repair(
        &self,
        malformed: &str,
        request: &GenerationRequest<'_>,
    ) -> Result<String, BackendError> {
        let prompt = build_repair_prompt(malformed, request.response_schema);
        // Reformatting is mechanical; run it deterministically
        self.complete(REPAIR_SYSTEM_PROMPT, &prompt, 0.0, request.response_schema)
            .await
    }
}

/// Extract the first text part of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, BackendError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .filter(|t| !t.is_empty())
        .ok_or(BackendError::EmptyResponse)
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    #[serde(rename = "systemInstruction")]
    system_instruction: ContentBody<'a>,
    contents: Vec<ContentBody<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfigBody<'a>,
}

#[derive(Debug, Serialize)]
struct ContentBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfigBody<'a> {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'a str,
    #[serde(rename = "responseSchema")]
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}
