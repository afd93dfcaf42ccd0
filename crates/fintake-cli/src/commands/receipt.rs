//! Receipt command - extract a total from OCR text and persist one expense.

use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use console::style;
use serde::Serialize;

use fintake_core::error::ReceiptError;
use fintake_core::receipt;
use fintake_core::TransactionStore;

use crate::store::JsonlLedger;

/// Arguments for the receipt command.
#[derive(Args)]
pub struct ReceiptArgs {
    /// OCR text of the receipt (.txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Ledger file receiving the transaction
    #[arg(short, long, default_value = "ledger.jsonl")]
    ledger: PathBuf,
}

/// What a successful receipt import reports back.
#[derive(Serialize)]
struct ReceiptResponse {
    id: String,
    amount_cents: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant: Option<String>,
}

pub async fn run(args: ReceiptArgs, _config_path: Option<&str>) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "txt" {
        anyhow::bail!(
            "unsupported file format: {}. Text recognition runs outside fintake; \
             pass the recognized text as a .txt file",
            extension
        );
    }

    let text = std::fs::read_to_string(&args.input)?;

    let total = match receipt::extract(&text) {
        Ok(total) => total,
        Err(ReceiptError::AmountNotFound { text }) => {
            // Surface the raw OCR text so a human can see what the scanner
            // saw and retry with a better scan.
            eprintln!(
                "{} Unable to extract an amount. OCR text follows:",
                style("✗").red()
            );
            eprintln!("{text}");
            anyhow::bail!("unable to extract amount from receipt");
        }
    };

    let amount_cents = total.amount_cents;
    let merchant = total.merchant.clone();

    // Receipts carry no reliable date; the import time stands in.
    let transaction = total.into_transaction(&text, Utc::now().naive_utc());

    let mut ledger = JsonlLedger::open(&args.ledger)?;
    let id = ledger.persist(&transaction)?;

    println!(
        "{}",
        serde_json::to_string(&ReceiptResponse {
            id,
            amount_cents,
            merchant,
        })?
    );

    Ok(())
}
