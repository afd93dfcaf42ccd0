//! Text inference abstraction layer for fintake.
//!
//! This crate provides a unified interface for best-effort structured-text
//! inference:
//! - `HostedBackend` calls a hosted text-generation HTTP endpoint
//! - `Disabled` is the null object used when no credential is configured
//!
//! Callers treat inference as strictly optional: every error from this crate
//! is a signal to degrade to local heuristics, never to fail a request.

mod error;
mod hosted;
mod service;

pub use error::InferenceError;
pub use hosted::HostedBackend;
pub use service::{Disabled, TextInferenceService};

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;
