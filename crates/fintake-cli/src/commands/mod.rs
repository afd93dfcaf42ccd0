//! CLI subcommands and shared plumbing.

pub mod config;
pub mod import;
pub mod parse;
pub mod receipt;

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use tracing::{debug, warn};

use fintake_core::models::FintakeConfig;
use fintake_core::statement::{AugmentedRecordParser, HeuristicRecordParser};
use fintake_core::{CandidateRecord, HostedBackend, PdfExtractor, PdfProcessor, Source};
use fintake_inference::TextInferenceService;

/// Load configuration from an explicit path, the default location, or
/// defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FintakeConfig> {
    match config_path {
        Some(path) => FintakeConfig::from_file(Path::new(path))
            .with_context(|| format!("failed to load config from {path}")),
        None => {
            let default = config::default_config_path();
            if default.exists() {
                Ok(FintakeConfig::from_file(&default)?)
            } else {
                Ok(FintakeConfig::default())
            }
        }
    }
}

/// Read statement text from the input file.
///
/// PDFs go through text extraction; `.txt` files are taken as
/// already-extracted text. Empty text is a terminal failure: there is
/// nothing downstream parsing could recover.
pub fn read_statement_text(input: &Path, config: &FintakeConfig) -> anyhow::Result<String> {
    let extension = input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let text = match extension.as_str() {
        "pdf" => {
            let data = std::fs::read(input)?;
            let mut extractor = PdfExtractor::new();
            extractor.load(&data)?;
            debug!("PDF has {} pages", extractor.page_count());
            extractor.extract_text()?
        }
        "txt" => std::fs::read_to_string(input)?,
        _ => anyhow::bail!("unsupported file format: {}", extension),
    };

    if text.trim().is_empty() {
        anyhow::bail!("no text extracted from {}", input.display());
    }
    if text.len() < config.pdf.min_text_length {
        warn!("extracted text is very short; is this a scanned document?");
    }

    Ok(text)
}

/// Parse statement lines into candidate records, using the hosted inference
/// service when a credential is configured.
///
/// Returns the records plus the source tag describing how they were parsed.
pub async fn parse_statement_lines(
    lines: &[String],
    config: &FintakeConfig,
    heuristic_only: bool,
) -> anyhow::Result<(Vec<CandidateRecord>, Source)> {
    if heuristic_only {
        let records = HeuristicRecordParser::new().parse_all(lines);
        return Ok((records, Source::PdfHeuristic));
    }

    let inference = &config.inference;
    let token = std::env::var(&inference.token_env)
        .ok()
        .filter(|t| !t.is_empty());

    let backend = HostedBackend::with_timeout(
        &inference.endpoint,
        &inference.model,
        token,
        Duration::from_secs(inference.timeout_secs),
    )?
    .with_max_new_tokens(inference.max_new_tokens);

    let augmented = backend.is_configured();
    let records = AugmentedRecordParser::new(backend).parse_all(lines).await;

    let source = if augmented {
        Source::PdfAugmented
    } else {
        Source::PdfHeuristic
    };
    Ok((records, source))
}
