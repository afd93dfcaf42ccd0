//! Batch import: per-record validation and persistence with independent
//! outcomes.

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::models::{
    BatchReport, FailureReason, ImportOutcome, ImportRecord, Source, TransactionType,
    ValidatedTransaction, DEFAULT_CURRENCY,
};
use crate::statement::rules::{normalize_amount, parse_datetime};

/// Description assigned to records that carry none.
const FALLBACK_DESCRIPTION: &str = "PDF import";

/// The injected storage collaborator.
///
/// Its concurrency discipline is its own responsibility; the importer only
/// requires that a failed `persist` is scoped to the one record it was given.
pub trait TransactionStore {
    /// Commit one transaction and return its new id.
    fn persist(&mut self, transaction: &ValidatedTransaction) -> Result<String, StoreError>;
}

/// Validates and persists a batch of candidate records, one outcome per
/// record.
///
/// Records are processed independently: a rejection or a store failure never
/// aborts its siblings, so partial success is the normal, reported outcome.
pub struct BatchImporter {
    source: Source,
    currency: String,
    fallback_description: String,
}

impl BatchImporter {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            currency: DEFAULT_CURRENCY.to_string(),
            fallback_description: FALLBACK_DESCRIPTION.to_string(),
        }
    }

    /// Override the currency stamped on imported transactions.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Override the placeholder description.
    pub fn with_fallback_description(mut self, description: impl Into<String>) -> Self {
        self.fallback_description = description.into();
        self
    }

    /// Import a batch, returning one outcome per input record in input order.
    pub fn import_batch<S: TransactionStore>(
        &self,
        records: &[ImportRecord],
        store: &mut S,
    ) -> BatchReport {
        let mut per_record = Vec::with_capacity(records.len());
        let mut imported = 0;

        for (index, record) in records.iter().enumerate() {
            let transaction = match self.validate(record) {
                Ok(transaction) => transaction,
                Err(reason) => {
                    debug!(index, ?reason, "rejected record");
                    per_record.push(ImportOutcome::rejected(index, reason));
                    continue;
                }
            };

            match store.persist(&transaction) {
                Ok(id) => {
                    imported += 1;
                    per_record.push(ImportOutcome::created(index, id));
                }
                Err(e) => {
                    warn!(index, error = %e, "persistence failed for record");
                    per_record.push(ImportOutcome::rejected(index, FailureReason::DbError));
                }
            }
        }

        BatchReport {
            imported,
            total: records.len(),
            per_record,
        }
    }

    /// Validate one untrusted record into a transaction ready to persist.
    ///
    /// Stage order matters: shape, then date, then amount, so the reported
    /// reason names the first gap a client should fix.
    fn validate(&self, record: &ImportRecord) -> Result<ValidatedTransaction, FailureReason> {
        let (Some(occurred_at_raw), Some(type_raw), Some(amount_raw)) = (
            &record.occurred_at_raw,
            &record.type_raw,
            &record.amount_raw,
        ) else {
            return Err(FailureReason::InvalidRecordShape);
        };

        let occurred_at = parse_datetime(occurred_at_raw).ok_or(FailureReason::InvalidDate)?;

        let amount = normalize_amount(amount_raw).map_err(|_| FailureReason::InvalidAmount)?;

        // An explicit INCOME/EXPENSE keyword wins; anything else (including
        // CREDIT/DEBIT) defers to the amount's sign.
        let transaction_type = TransactionType::from_raw(type_raw)
            .unwrap_or_else(|| TransactionType::from_sign(amount.sign));

        let category = record
            .category
            .as_deref()
            .filter(|category| !category.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| transaction_type.default_category().to_string());

        let description = record
            .description
            .as_deref()
            .filter(|description| !description.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.fallback_description.clone());

        Ok(ValidatedTransaction {
            transaction_type,
            amount_cents: amount.minor_units,
            currency: self.currency.clone(),
            category,
            description,
            occurred_at,
            source: self.source,
            merchant: None,
            notes: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use crate::models::CandidateRecord;
    use crate::statement::{HeuristicRecordParser, RecordParser};

    use super::*;

    /// In-memory store; `fail_on` injects a failure for one index.
    #[derive(Default)]
    struct MemoryStore {
        transactions: Vec<ValidatedTransaction>,
        fail_on: Option<usize>,
    }

    impl TransactionStore for MemoryStore {
        fn persist(&mut self, transaction: &ValidatedTransaction) -> Result<String, StoreError> {
            if self.fail_on == Some(self.transactions.len()) {
                return Err(StoreError("injected failure".to_string()));
            }
            self.transactions.push(transaction.clone());
            Ok(format!("txn-{}", self.transactions.len()))
        }
    }

    fn record(date: &str, kind: &str, amount: &str) -> ImportRecord {
        ImportRecord {
            occurred_at_raw: Some(date.to_string()),
            type_raw: Some(kind.to_string()),
            category: None,
            description: None,
            amount_raw: Some(amount.to_string()),
        }
    }

    #[test]
    fn test_partial_failure_arithmetic() {
        let records = vec![
            record("9/7/2025 1:32:00 AM", "EXPENSE", "$85.40"),
            record("9/7/2025 1:32:00 AM", "EXPENSE", "garbage"),
            record("9/8/2025 2:00:00 PM", "INCOME", "+$100.00"),
            record("9/8/2025 2:00:00 PM", "INCOME", "$0.00"),
        ];

        let mut store = MemoryStore::default();
        let report = BatchImporter::new(Source::PdfHeuristic).import_batch(&records, &mut store);

        assert_eq!(report.imported, 2);
        assert_eq!(report.total, 4);
        assert_eq!(report.per_record.len(), 4);
        for (index, outcome) in report.per_record.iter().enumerate() {
            assert_eq!(outcome.index, index);
        }
        assert_eq!(report.per_record[1].reason, Some(FailureReason::InvalidAmount));
        assert_eq!(report.per_record[3].reason, Some(FailureReason::InvalidAmount));
    }

    #[test]
    fn test_missing_keys_reject_shape() {
        let missing_amount = ImportRecord {
            occurred_at_raw: Some("9/7/2025".to_string()),
            type_raw: Some("EXPENSE".to_string()),
            ..Default::default()
        };

        let mut store = MemoryStore::default();
        let report =
            BatchImporter::new(Source::PdfHeuristic).import_batch(&[missing_amount], &mut store);

        assert!(!report.per_record[0].created);
        assert_eq!(
            report.per_record[0].reason,
            Some(FailureReason::InvalidRecordShape)
        );
    }

    #[test]
    fn test_empty_date_rejects_as_invalid_date() {
        let records = vec![record("", "EXPENSE", "$5.00")];
        let mut store = MemoryStore::default();
        let report = BatchImporter::new(Source::PdfHeuristic).import_batch(&records, &mut store);
        assert_eq!(report.per_record[0].reason, Some(FailureReason::InvalidDate));
    }

    #[test]
    fn test_store_failure_is_record_scoped() {
        let records = vec![
            record("9/7/2025 1:32:00 AM", "EXPENSE", "$1.00"),
            record("9/7/2025 1:32:00 AM", "EXPENSE", "$2.00"),
            record("9/7/2025 1:32:00 AM", "EXPENSE", "$3.00"),
        ];

        let mut store = MemoryStore {
            fail_on: Some(1),
            ..Default::default()
        };
        let report = BatchImporter::new(Source::PdfHeuristic).import_batch(&records, &mut store);

        assert_eq!(report.imported, 2);
        assert_eq!(report.per_record[1].reason, Some(FailureReason::DbError));
        assert!(report.per_record[2].created);
    }

    #[test]
    fn test_type_inferred_from_sign_when_keyword_unknown() {
        let records = vec![
            record("9/7/2025", "DEBIT", "-$50.00"),
            record("9/7/2025", "whatever", "$50.00"),
        ];

        let mut store = MemoryStore::default();
        BatchImporter::new(Source::PdfHeuristic).import_batch(&records, &mut store);

        assert_eq!(
            store.transactions[0].transaction_type,
            TransactionType::Expense
        );
        assert_eq!(store.transactions[0].category, "Imported");
        assert_eq!(
            store.transactions[1].transaction_type,
            TransactionType::Income
        );
        assert_eq!(store.transactions[1].category, "Income");
    }

    #[test]
    fn test_explicit_type_beats_sign() {
        // Positive amount, explicit EXPENSE keyword.
        let records = vec![record("9/7/2025", "expense", "$50.00")];
        let mut store = MemoryStore::default();
        BatchImporter::new(Source::PdfHeuristic).import_batch(&records, &mut store);
        assert_eq!(
            store.transactions[0].transaction_type,
            TransactionType::Expense
        );
    }

    #[test]
    fn test_defaults_applied() {
        let mut rec = record("9/7/2025", "EXPENSE", "$5.00");
        rec.category = Some(String::new());
        rec.description = Some(String::new());

        let mut store = MemoryStore::default();
        BatchImporter::new(Source::PdfAugmented).import_batch(&[rec], &mut store);

        let tx = &store.transactions[0];
        assert_eq!(tx.category, "Imported");
        assert_eq!(tx.description, "PDF import");
        assert_eq!(tx.currency, "USD");
        assert_eq!(tx.source, Source::PdfAugmented);
    }

    #[test]
    fn test_end_to_end_heuristic_line_to_transaction() {
        let parsed: CandidateRecord = HeuristicRecordParser::new()
            .parse("9/7/2025 1:32:00 AM EXPENSE groceries weekly-shop $85.40");
        let records = vec![ImportRecord::from(parsed)];

        let mut store = MemoryStore::default();
        let report = BatchImporter::new(Source::PdfHeuristic).import_batch(&records, &mut store);

        assert_eq!(report.imported, 1);
        let tx = &store.transactions[0];
        assert_eq!(tx.transaction_type, TransactionType::Expense);
        assert_eq!(tx.amount_cents, 8540);
        assert_eq!(tx.category, "groceries");
        assert_eq!(tx.description, "weekly-shop");
        assert_eq!(
            tx.occurred_at,
            NaiveDate::from_ymd_opt(2025, 9, 7)
                .unwrap()
                .and_hms_opt(1, 32, 0)
                .unwrap()
        );
    }
}
