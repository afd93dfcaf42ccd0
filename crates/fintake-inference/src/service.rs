//! The inference capability trait and its null object.

use crate::Result;

/// Capability object for prompt-in/text-out inference.
///
/// Implementations must be cheap to query via [`is_configured`], because
/// callers check it once per batch before issuing any per-line calls.
///
/// [`is_configured`]: TextInferenceService::is_configured
#[allow(async_fn_in_trait)]
pub trait TextInferenceService {
    /// Whether the service can be called at all (credential present, etc.).
    fn is_configured(&self) -> bool {
        true
    }

    /// Run one inference call and return the raw generated text.
    async fn infer(&self, prompt: &str) -> Result<String>;
}

/// Null-object service used when inference is unavailable.
///
/// Reports unconfigured and fails every call, so callers exercise their
/// fallback path without conditional branching at the call site.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

impl TextInferenceService for Disabled {
    fn is_configured(&self) -> bool {
        false
    }

    async fn infer(&self, _prompt: &str) -> Result<String> {
        Err(crate::InferenceError::Unconfigured)
    }
}
