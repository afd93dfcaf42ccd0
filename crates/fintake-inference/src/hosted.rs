//! Hosted text-generation backend.
//!
//! Speaks the `POST /models/<model>` text-generation protocol: a JSON body of
//! `{"inputs": ..., "parameters": {"max_new_tokens": ...}}` answered by either
//! an array of `{"generated_text": ...}` objects or a bare JSON value. The
//! response shape varies by model, so extraction is tolerant and falls back to
//! the raw JSON when no text field is present.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::service::TextInferenceService;
use crate::{InferenceError, Result};

/// Default per-call timeout. Hosted endpoints can queue cold models for a
/// while; anything beyond this is treated as a failed call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on generated output length.
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 128;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Serialize)]
struct GenerateParameters {
    max_new_tokens: u32,
}

/// Inference service backed by a hosted text-generation endpoint.
pub struct HostedBackend {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
    max_new_tokens: u32,
}

impl HostedBackend {
    /// Create a backend for `endpoint` (base URL) and `model`.
    ///
    /// A missing `token` produces a backend that reports unconfigured and
    /// fails every call, matching [`Disabled`](crate::Disabled) behavior, so
    /// callers can construct it unconditionally from configuration.
    pub fn new(endpoint: &str, model: &str, token: Option<String>) -> Result<Self> {
        Self::with_timeout(endpoint, model, token, DEFAULT_TIMEOUT)
    }

    /// Same as [`new`](Self::new) with an explicit per-call timeout.
    pub fn with_timeout(
        endpoint: &str,
        model: &str,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InferenceError::Client(e.to_string()))?;

        let url = format!("{}/{}", endpoint.trim_end_matches('/'), model);

        Ok(Self {
            client,
            url,
            token,
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
        })
    }

    /// Override the generated-output cap.
    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }
}

impl TextInferenceService for HostedBackend {
    fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    async fn infer(&self, prompt: &str) -> Result<String> {
        let token = self.token.as_deref().ok_or(InferenceError::Unconfigured)?;

        let body = GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters {
                max_new_tokens: self.max_new_tokens,
            },
        };

        let resp = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = resp.json().await?;
        let text = extract_generated_text(&value)?;
        debug!(chars = text.len(), "inference call completed");
        Ok(text)
    }
}

/// Pull the generated text out of a polymorphic response body.
///
/// Arrays of generation objects carry `generated_text` (or `text`); anything
/// else is returned re-serialized, leaving it to the caller's JSON repair to
/// make sense of it.
fn extract_generated_text(value: &Value) -> Result<String> {
    match value {
        Value::Array(items) => {
            let first = items.first().ok_or_else(|| {
                InferenceError::MalformedResponse("empty response array".to_string())
            })?;
            if let Some(text) = first.get("generated_text").and_then(Value::as_str) {
                return Ok(text.to_string());
            }
            if let Some(text) = first.get("text").and_then(Value::as_str) {
                return Ok(text.to_string());
            }
            Ok(first.to_string())
        }
        other => Ok(other.to_string()),
    }
}
