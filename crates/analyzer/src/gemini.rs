//! Google Gemini `generateContent` client.

use deckcheck_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Environment variable consulted for the API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Public Gemini API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// A language model that answers a prompt under a system instruction.
pub trait InferenceClient {
    /// Send one request and return the reply text.
    fn generate(&self, system_instruction: &str, prompt: &str) -> Result<String>;
}

/// Connection settings for [`GeminiClient`].
#[derive(Clone)]
pub struct GeminiConfig {
    /// API credential.
    pub api_key: String,

    /// Model name, e.g. `gemini-1.5-flash-latest`.
    pub model: String,

    /// Scheme and host of the API.
    pub base_url: String,

    /// Whole-request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Settings for the public endpoint and default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(300),
        }
    }

    /// Use a different model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Use a different endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn into_text(self) -> Result<String> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no reason given".to_string());
            return Err(Error::Inference(format!(
                "model returned no candidates ({})",
                reason
            )));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.is_empty() {
            return Err(Error::Inference("model returned an empty reply".to_string()));
        }
        Ok(text)
    }
}

/// Blocking client for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::blocking::Client,
}

impl GeminiClient {
    /// Build a client from its settings.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Inference(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    /// The model requests are sent to.
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

impl InferenceClient for GeminiClient {
    fn generate(&self, system_instruction: &str, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![RequestPart {
                    text: system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .map_err(|e| Error::Inference(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Inference(format!(
                "API returned {}: {}",
                status,
                body.trim()
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| Error::Inference(format!("Failed to decode API response: {}", e)))?;

        parsed.into_text()
    }
}
