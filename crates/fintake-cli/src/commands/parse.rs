//! Parse command - preview candidate records from a statement.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use fintake_core::statement::split_lines;
use fintake_core::{CandidateRecord, Source};

use super::{load_config, parse_statement_lines, read_statement_text};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input statement (PDF, or pre-extracted .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Skip inference and use only heuristic parsing
    #[arg(long)]
    heuristic_only: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// The preview shape consumed by the import step.
#[derive(Serialize)]
struct ParsePreview {
    count: usize,
    records: Vec<CandidateRecord>,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("input file not found: {}", args.input.display());
    }

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

    let (records, source) = parse_statement_lines(&lines, &config, args.heuristic_only).await?;
    pb.finish_and_clear();

    eprintln!(
        "{} Parsed {} records ({})",
        style("ℹ").blue(),
        records.len(),
        match source {
            Source::PdfAugmented => "inference-augmented",
            _ => "heuristic",
        }
    );

    let preview = ParsePreview {
        count: records.len(),
        records,
    };
    let output = format_preview(&preview, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Preview written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_preview(preview: &ParsePreview, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(preview)?),
        OutputFormat::Csv => format_csv(preview),
        OutputFormat::Text => Ok(format_text(preview)),
    }
}

fn format_csv(preview: &ParsePreview) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["date-time", "type", "category", "description", "amount"])?;
    for record in &preview.records {
        wtr.write_record([
            &record.occurred_at_raw,
            &record.type_raw,
            &record.category,
            &record.description,
            &record.amount_raw,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(preview: &ParsePreview) -> String {
    let mut output = String::new();

    output.push_str(&format!("Records: {}\n\n", preview.count));
    for (index, record) in preview.records.iter().enumerate() {
        output.push_str(&format!("#{}\n", index));
        output.push_str(&format!("  date-time:   {}\n", record.occurred_at_raw));
        output.push_str(&format!("  type:        {}\n", record.type_raw));
        output.push_str(&format!("  category:    {}\n", record.category));
        output.push_str(&format!("  description: {}\n", record.description));
        output.push_str(&format!("  amount:      {}\n", record.amount_raw));
    }

    output
}
