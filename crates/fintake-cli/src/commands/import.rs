//! Import command - parse a statement and persist its records to the ledger.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use fintake_core::statement::split_lines;
use fintake_core::{BatchImporter, BatchReport, FailureReason, ImportRecord, Source};

use crate::store::JsonlLedger;

use super::{load_config, parse_statement_lines, read_statement_text};

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// Input statement (PDF, pre-extracted .txt, or parsed .json records)
    #[arg(required = true)]
    input: PathBuf,

    /// Ledger file receiving imported transactions
    #[arg(short, long, default_value = "ledger.jsonl")]
    ledger: PathBuf,

    /// Skip inference and use only heuristic parsing
    #[arg(long)]
    heuristic_only: bool,
}

/// Accepts the parse preview shape: `{ count, records }`.
#[derive(Deserialize)]
struct PreviewBody {
    records: Vec<ImportRecord>,
}

pub async fn run(args: ImportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let (records, source): (Vec<ImportRecord>, Source) = if extension == "json" {
        // Previously-parsed records; no way to tell how they were produced,
        // so they get the plain heuristic source tag.
        let content = std::fs::read_to_string(&args.input)?;
        let body: PreviewBody = serde_json::from_str(&content)
            .context("invalid records JSON; expected { count, records: [...] }")?;
        (body.records, Source::PdfHeuristic)
    } else {
        let text = read_statement_text(&args.input, &config)?;
        let lines = split_lines(&text);

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(format!("Parsing {} lines...", lines.len()));
        pb.enable_steady_tick(Duration::from_millis(100));

        let (candidates, source) =
            parse_statement_lines(&lines, &config, args.heuristic_only).await?;
        pb.finish_and_clear();

        let records = candidates.into_iter().map(ImportRecord::from).collect();
        (records, source)
    };

    let mut ledger = JsonlLedger::open(&args.ledger)?;
    let importer = BatchImporter::new(source)
        .with_currency(config.parsing.default_currency.clone())
        .with_fallback_description(config.parsing.fallback_description.clone());

    let report = importer.import_batch(&records, &mut ledger);

    // The machine-readable report goes to stdout; the human summary to
    // stderr, so piping stays clean.
    println!("{}", serde_json::to_string(&report)?);
    print_summary(&report, &args.ledger);

    Ok(())
}

fn print_summary(report: &BatchReport, ledger: &PathBuf) {
    eprintln!();
    eprintln!(
        "{} Imported {} of {} records into {}",
        style("✓").green(),
        style(report.imported).green(),
        report.total,
        ledger.display()
    );

    let rejected: Vec<_> = report.per_record.iter().filter(|o| !o.created).collect();
    if !rejected.is_empty() {
        eprintln!("{}", style("Rejected records:").red());
        for outcome in rejected {
            eprintln!(
                "  - record {}: {}",
                outcome.index,
                reason_label(outcome.reason)
            );
        }
    }
}

fn reason_label(reason: Option<FailureReason>) -> &'static str {
    match reason {
        Some(FailureReason::InvalidRecordShape) => "invalid_record_shape",
        Some(FailureReason::InvalidDate) => "invalid_date",
        Some(FailureReason::InvalidAmount) => "invalid_amount",
        Some(FailureReason::DbError) => "db_error",
        None => "unknown",
    }
}
