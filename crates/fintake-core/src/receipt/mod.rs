//! Receipt total and merchant extraction from OCR text.
//!
//! Receipts arrive as one noisy OCR blob rather than tabular statement rows,
//! so this module keeps its own amount heuristics instead of sharing the
//! statement tokenizer's: a labeled `total`/`amount` scan with first-match
//! semantics, and a rejection of non-positive values after parsing.

use std::str::FromStr;

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::error::ReceiptError;
use crate::models::{Source, TransactionType, ValidatedTransaction, DEFAULT_CURRENCY};

lazy_static! {
    static ref TOTAL_LABEL: Regex = Regex::new(r"(?i)total[^\d]*([\d,.]+)").unwrap();
    static ref AMOUNT_LABEL: Regex = Regex::new(r"(?i)amount[^\d]*([\d,.]+)").unwrap();
}

/// Merchant candidates must be longer than this many characters.
const MERCHANT_MIN_CHARS: usize = 2;

/// ...and shorter than this many; anything longer is a wrapped OCR line, not
/// a shop name.
const MERCHANT_MAX_CHARS: usize = 50;

/// The values a receipt yields: one total and, when the header survived OCR,
/// a merchant name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptTotal {
    /// Strictly positive cents.
    pub amount_cents: i64,
    pub merchant: Option<String>,
}

/// Scan OCR text for a total amount and a merchant name.
///
/// The merchant is the first non-empty line whose length falls in the
/// plausible window; the first candidate wins and is never reconsidered. The
/// amount is the first `total`/`amount`-labeled line whose numeric substring
/// parses to positive cents; remaining lines are ignored. With no usable
/// amount the whole extraction fails, carrying the raw text for diagnosis.
pub fn extract(ocr_text: &str) -> Result<ReceiptTotal, ReceiptError> {
    let mut merchant: Option<String> = None;

    for line in ocr_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if merchant.is_none() {
            let chars = line.chars().count();
            if chars > MERCHANT_MIN_CHARS && chars < MERCHANT_MAX_CHARS {
                merchant = Some(line.to_string());
            }
        }

        let captures = TOTAL_LABEL
            .captures(line)
            .or_else(|| AMOUNT_LABEL.captures(line));
        if let Some(caps) = captures {
            if let Some(cents) = parse_cents_loose(&caps[1]) {
                if cents > 0 {
                    debug!(cents, merchant = ?merchant, "accepted first labeled total");
                    return Ok(ReceiptTotal {
                        amount_cents: cents,
                        merchant,
                    });
                }
            }
        }
    }

    Err(ReceiptError::AmountNotFound {
        text: ocr_text.to_string(),
    })
}

impl ReceiptTotal {
    /// Build the transaction the receipt path persists: an expense dated
    /// `occurred_at` (the upload time; receipts carry no reliable date), with
    /// the raw OCR text attached as notes for later auditing.
    pub fn into_transaction(self, ocr_text: &str, occurred_at: NaiveDateTime) -> ValidatedTransaction {
        ValidatedTransaction {
            transaction_type: TransactionType::Expense,
            amount_cents: self.amount_cents,
            currency: DEFAULT_CURRENCY.to_string(),
            category: "Uncategorized".to_string(),
            description: "Imported from receipt".to_string(),
            occurred_at,
            source: Source::Receipt,
            merchant: self.merchant,
            notes: None,
        }
        .with_notes(ocr_text)
    }
}

/// Parse a captured numeric substring into cents.
///
/// Thousands separators are stripped; a second decimal point and anything
/// after it is dropped (prefix semantics), which also tolerates a sentence
/// period glued to the number.
fn parse_cents_loose(raw: &str) -> Option<i64> {
    let no_separators = raw.replace(',', "");

    let mut parts = no_separators.splitn(3, '.');
    let integer = parts.next().unwrap_or("");
    let joined = match parts.next() {
        Some(fraction) if !fraction.is_empty() => {
            let integer = if integer.is_empty() { "0" } else { integer };
            format!("{integer}.{fraction}")
        }
        _ => integer.to_string(),
    };
    if joined.is_empty() {
        return None;
    }

    let value = Decimal::from_str(&joined).ok()?;
    (value * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
