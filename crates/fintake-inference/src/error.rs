//! Error types for the inference layer.

use thiserror::Error;

/// Errors that can occur during a text inference call.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// No credential is configured; the service cannot be called at all.
    #[error("inference service is not configured")]
    Unconfigured,

    /// Failed to construct the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// The HTTP request failed (connection, timeout, body decode).
    #[error("inference request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("inference endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body carried no usable generated text.
    #[error("malformed inference response: {0}")]
    MalformedResponse(String),
}
