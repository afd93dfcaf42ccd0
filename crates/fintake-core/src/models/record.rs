//! Transaction record models, from untrusted candidates to validated rows.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Currency used when the source text carries none.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Cap on stored free-form notes, in characters.
pub const MAX_NOTES_LEN: usize = 2000;

/// An untrusted, partially-parsed transaction extracted from one line of
/// source text.
///
/// Every field is always present; a field the parser could not locate is the
/// empty string, never an absent key. Serde renames map the struct onto the
/// wire shape (`"date-time"`, `"type"`, `"category"`, `"description"`,
/// `"amount"`) used by the parse preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Free-form date-time text, e.g. `9/9/2025, 3:51:00 AM`.
    #[serde(rename = "date-time", default)]
    pub occurred_at_raw: String,

    /// Free-form type keyword (INCOME/EXPENSE/CREDIT/DEBIT or anything else).
    #[serde(rename = "type", default)]
    pub type_raw: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub description: String,

    /// Free-form amount text, e.g. `+$12000.00` or `(45.00)`.
    #[serde(rename = "amount", default)]
    pub amount_raw: String,
}

/// The JSON import boundary shape.
///
/// Unlike [`CandidateRecord`], the three required fields are `Option` so a
/// record missing them *entirely* can be rejected as `invalid_record_shape`
/// rather than conflated with one carrying empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportRecord {
    #[serde(rename = "date-time")]
    pub occurred_at_raw: Option<String>,

    #[serde(rename = "type")]
    pub type_raw: Option<String>,

    pub category: Option<String>,

    pub description: Option<String>,

    #[serde(rename = "amount")]
    pub amount_raw: Option<String>,
}

impl From<CandidateRecord> for ImportRecord {
    fn from(record: CandidateRecord) -> Self {
        Self {
            occurred_at_raw: Some(record.occurred_at_raw),
            type_raw: Some(record.type_raw),
            category: Some(record.category),
            description: Some(record.description),
            amount_raw: Some(record.amount_raw),
        }
    }
}

/// Resolved transaction direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Parse an explicit INCOME/EXPENSE keyword, case-insensitively.
    ///
    /// CREDIT/DEBIT and everything else return `None` and are left to sign
    /// inference.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Some(Self::Income),
            "EXPENSE" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Infer the direction from an amount's sign: negative spends, the rest
    /// earns.
    pub fn from_sign(sign: Sign) -> Self {
        match sign {
            Sign::Negative => Self::Expense,
            Sign::Positive => Self::Income,
        }
    }

    /// Category applied to imported records that carry none.
    pub fn default_category(&self) -> &'static str {
        match self {
            Self::Expense => "Imported",
            Self::Income => "Income",
        }
    }
}

/// Where a transaction entered the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Source {
    Manual,
    Receipt,
    PdfHeuristic,
    PdfAugmented,
}

/// Sign of a normalized amount, tracked separately from its magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

/// A currency amount in integer minor units (cents).
///
/// `minor_units` is always the absolute value; the sign is derived from an
/// explicit prefix, parenthesization, or downstream type inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedAmount {
    /// Absolute value in cents. Always positive; zero amounts fail to
    /// normalize.
    pub minor_units: i64,
    pub sign: Sign,
}

impl NormalizedAmount {
    /// The amount with its sign applied.
    pub fn signed_minor_units(&self) -> i64 {
        match self.sign {
            Sign::Positive => self.minor_units,
            Sign::Negative => -self.minor_units,
        }
    }
}

/// A trusted transaction, ready for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedTransaction {
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Always positive; direction lives in `transaction_type`.
    pub amount_cents: i64,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Never empty; defaulted by type when the source had none.
    pub category: String,

    pub description: String,

    pub occurred_at: NaiveDateTime,

    pub source: Source,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl ValidatedTransaction {
    /// Attach free-form notes, truncated to [`MAX_NOTES_LEN`] characters.
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.chars().take(MAX_NOTES_LEN).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_from_raw() {
        assert_eq!(TransactionType::from_raw("INCOME"), Some(TransactionType::Income));
        assert_eq!(TransactionType::from_raw("expense"), Some(TransactionType::Expense));
        assert_eq!(TransactionType::from_raw("  Income "), Some(TransactionType::Income));
        assert_eq!(TransactionType::from_raw("CREDIT"), None);
        assert_eq!(TransactionType::from_raw(""), None);
    }

    #[test]
    fn test_type_from_sign() {
        assert_eq!(TransactionType::from_sign(Sign::Negative), TransactionType::Expense);
        assert_eq!(TransactionType::from_sign(Sign::Positive), TransactionType::Income);
    }

    #[test]
    fn test_signed_minor_units() {
        let amount = NormalizedAmount {
            minor_units: 8540,
            sign: Sign::Negative,
        };
        assert_eq!(amount.signed_minor_units(), -8540);
    }

    #[test]
    fn test_candidate_record_wire_keys() {
        let record = CandidateRecord {
            occurred_at_raw: "9/9/2025, 3:51:00 AM".to_string(),
            type_raw: "INCOME".to_string(),
            category: "sharemarket".to_string(),
            description: "monthly-salary".to_string(),
            amount_raw: "+$12000.00".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date-time"], "9/9/2025, 3:51:00 AM");
        assert_eq!(json["type"], "INCOME");
        assert_eq!(json["amount"], "+$12000.00");
    }

    #[test]
    fn test_import_record_missing_keys_deserialize_to_none() {
        let record: ImportRecord =
            serde_json::from_str(r#"{"date-time": "9/9/2025", "type": "INCOME"}"#).unwrap();
        assert_eq!(record.occurred_at_raw.as_deref(), Some("9/9/2025"));
        assert!(record.amount_raw.is_none());
        assert!(record.category.is_none());
    }

    #[test]
    fn test_notes_truncation() {
        let long = "x".repeat(MAX_NOTES_LEN + 50);
        let tx = sample_transaction().with_notes(&long);
        assert_eq!(tx.notes.unwrap().chars().count(), MAX_NOTES_LEN);
    }

    fn sample_transaction() -> ValidatedTransaction {
        ValidatedTransaction {
            transaction_type: TransactionType::Expense,
            amount_cents: 100,
            currency: DEFAULT_CURRENCY.to_string(),
            category: "Imported".to_string(),
            description: "test".to_string(),
            occurred_at: chrono::NaiveDate::from_ymd_opt(2025, 9, 7)
                .unwrap()
                .and_time(chrono::NaiveTime::MIN),
            source: Source::Manual,
            merchant: None,
            notes: None,
        }
    }
}
