//! Configuration structures for the ingestion pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the fintake pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FintakeConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Statement parsing and import configuration.
    pub parsing: ParsingConfig,

    /// Hosted inference configuration.
    pub inference: InferenceConfig,
}

impl Default for FintakeConfig {
    fn default() -> Self {
        Self {
            pdf: PdfConfig::default(),
            parsing: ParsingConfig::default(),
            inference: InferenceConfig::default(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum extracted-text length before a statement is considered
    /// text-based; shorter extractions are likely scans and get a warning.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_length: 50,
        }
    }
}

/// Statement parsing and import configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Currency assigned to imported transactions.
    pub default_currency: String,

    /// Description assigned to records that carry none.
    pub fallback_description: String,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            default_currency: super::DEFAULT_CURRENCY.to_string(),
            fallback_description: "PDF import".to_string(),
        }
    }
}

/// Hosted inference configuration.
///
/// The credential itself never lives in the file; `token_env` names the
/// environment variable it is read from. An unset variable disables
/// augmentation and the pipeline degrades to heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Base URL of the hosted text-generation endpoint.
    pub endpoint: String,

    /// Model identifier appended to the endpoint.
    pub model: String,

    /// Environment variable holding the API token.
    pub token_env: String,

    /// Per-call timeout in seconds.
    pub timeout_secs: u64,

    /// Cap on generated output length.
    pub max_new_tokens: u32,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api-inference.huggingface.co/models".to_string(),
            model: "google/flan-t5-small".to_string(),
            token_env: "HF_TOKEN".to_string(),
            timeout_secs: 30,
            max_new_tokens: 128,
        }
    }
}

impl FintakeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
