//! Language-model port and the Gemini adapter.
//!
//! The model is treated as an opaque text-completion service behind the
//! [`LanguageModel`] trait — one synchronous call, no streaming, no partial
//! results. The orchestrator and the HTTP layer only ever see
//! `Arc<dyn LanguageModel>`, so tests substitute a double without touching
//! any global state.
//!
//! [`GeminiClient`] is intentionally thin: build the request body, post it,
//! pull the first candidate's text out. Everything that can go wrong maps
//! into [`LlmError`] and is handed to the retry policy — the adapter does
//! not decide what is transient.

use crate::error::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Longest provider error body kept in an [`LlmError::Api`] message.
const MAX_ERROR_BODY: usize = 300;

/// An opaque text-completion service.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Submit a prompt (instructions plus document text) and return the
    /// model's free-text response.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Adapter for the Gemini `generateContent` REST API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

impl GeminiClient {
    pub fn new(
        http: reqwest::Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (self-hosted proxy, test
    /// server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: truncate_body(message),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        let text = completion_text(parsed)?;
        debug!(model = %self.model, chars = text.len(), "completion received");
        Ok(text)
    }
}

/// Pull the completion text out of a parsed response.
///
/// A `200 OK` with no candidates or no text parts is still a provider
/// failure from the orchestrator's point of view.
fn completion_text(response: GenerateContentResponse) -> Result<String, LlmError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::MalformedResponse("no candidates in response".into()))?;

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(LlmError::MalformedResponse(
            "candidate contained no text parts".into(),
        ));
    }
    Ok(text)
}

fn truncate_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body;
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &body[..end])
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}
