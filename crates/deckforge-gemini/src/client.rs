//! Gemini `generateContent` client.
//!
//! One blocking POST per call:
//!
//! ```text
//! POST {endpoint}/models/{model}:generateContent
//! { "contents": [ { "parts": [ { "text": "<prompt>" } ] } ] }
//! ```
//!
//! The generated text is read from `candidates[0].content.parts[0].text`.
//! There is no retry; any failure is returned to the caller as-is.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::GeminiError;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Anything that turns a prompt into free-form text.
pub trait TextGenerator {
    fn generate_text(&self, prompt: &str) -> Result<String, GeminiError>;
}

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Serialize the request body for a prompt.
pub fn request_body(prompt: &str) -> Result<String, GeminiError> {
    let request = GenerateContentRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart { text: prompt }],
        }],
    };
    Ok(serde_json::to_string(&request)?)
}

/// Pull `candidates[0].content.parts[0].text` out of a response body.
pub fn parse_response_text(body: &str) -> Result<String, GeminiError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| GeminiError::ResponseParse(format!("malformed response body: {e}")))?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| GeminiError::ResponseParse("no candidate text in response".to_string()))
}

// ── Client ───────────────────────────────────────────────────────────────────

/// Connection settings for [`GeminiClient`].
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl GeminiSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct GeminiClient {
    agent: ureq::Agent,
    settings: GeminiSettings,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Result<Self, GeminiError> {
        if settings.api_key.trim().is_empty() {
            return Err(GeminiError::Config("API key is empty".to_string()));
        }

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(settings.timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self { agent, settings })
    }

    /// The full `generateContent` URL for the configured model.
    pub fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }
}

impl TextGenerator for GeminiClient {
    fn generate_text(&self, prompt: &str) -> Result<String, GeminiError> {
        let body = request_body(prompt)?;
        let url = self.url();

        debug!(url = %url, prompt_len = prompt.len(), "sending generateContent request");

        let mut response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.settings.api_key)
            .send(body)
            .map_err(|e| GeminiError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|e| GeminiError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let generated = parse_response_text(&text)?;
        info!(
            model = %self.settings.model,
            response_len = generated.len(),
            "generateContent complete"
        );
        Ok(generated)
    }
}
