//! Per-record import outcomes and the aggregate batch report.

use serde::{Deserialize, Serialize};

/// Why a single record was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Required keys were missing entirely (not even empty strings).
    InvalidRecordShape,
    /// Date-time field absent or unparseable.
    InvalidDate,
    /// Amount field absent, non-numeric, or zero.
    InvalidAmount,
    /// The storage collaborator failed while committing this record.
    DbError,
}

/// Outcome of one record in a batch. Immutable once built; the `index`
/// matches the record's position in the input so clients can correlate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub index: usize,
    pub created: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
}

impl ImportOutcome {
    /// A successfully persisted record.
    pub fn created(index: usize, id: String) -> Self {
        Self {
            index,
            created: true,
            id: Some(id),
            reason: None,
        }
    }

    /// A rejected record.
    pub fn rejected(index: usize, reason: FailureReason) -> Self {
        Self {
            index,
            created: false,
            id: None,
            reason: Some(reason),
        }
    }
}

/// Aggregate result of a batch import. Partial success is the expected,
/// documented outcome, not an error state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Count of records that were persisted.
    pub imported: usize,
    /// Count of records in the input.
    pub total: usize,
    /// One outcome per input record, in input order.
    #[serde(rename = "perRecord")]
    pub per_record: Vec<ImportOutcome>,
}
