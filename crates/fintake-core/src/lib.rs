//! Core library for statement and receipt ingestion.
//!
//! This crate provides:
//! - PDF text extraction (lopdf + pdf-extract)
//! - heuristic statement-line parsing into untrusted candidate records
//! - optional inference-augmented parsing with per-line heuristic fallback
//! - receipt total/merchant extraction from OCR text
//! - batch import with independent per-record validation and outcomes

pub mod error;
pub mod import;
pub mod models;
pub mod pdf;
pub mod receipt;
pub mod statement;

pub use error::{FintakeError, Result};
pub use import::{BatchImporter, TransactionStore};
pub use models::{
    BatchReport, CandidateRecord, FailureReason, FintakeConfig, ImportOutcome, ImportRecord,
    Source, TransactionType, ValidatedTransaction,
};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use receipt::ReceiptTotal;
pub use statement::{AugmentedRecordParser, HeuristicRecordParser, RecordParser};

/// Re-export inference types.
pub use fintake_inference::{Disabled, HostedBackend, TextInferenceService};
