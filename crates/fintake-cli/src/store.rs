//! Append-only JSON-lines ledger used as the persistence collaborator.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use fintake_core::error::StoreError;
use fintake_core::{TransactionStore, ValidatedTransaction};

/// One persisted row: the transaction plus its id.
#[derive(Serialize)]
struct LedgerRow<'a> {
    id: &'a str,
    #[serde(flatten)]
    transaction: &'a ValidatedTransaction,
}

/// Append-only JSON-lines ledger.
///
/// Ids are `txn-<n>` where `n` continues from the rows already in the file,
/// so re-running an import never reuses an id.
pub struct JsonlLedger {
    path: PathBuf,
    next_seq: u64,
}

impl JsonlLedger {
    /// Open (or create on first persist) the ledger at `path`.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let existing = match std::fs::File::open(path) {
            Ok(file) => BufReader::new(file).lines().count() as u64,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e),
        };

        Ok(Self {
            path: path.to_path_buf(),
            next_seq: existing + 1,
        })
    }
}

impl TransactionStore for JsonlLedger {
    fn persist(&mut self, transaction: &ValidatedTransaction) -> Result<String, StoreError> {
        let id = format!("txn-{}", self.next_seq);
        let row = LedgerRow {
            id: &id,
            transaction,
        };
        let line = serde_json::to_string(&row).map_err(|e| StoreError(e.to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError(e.to_string()))?;
        writeln!(file, "{line}").map_err(|e| StoreError(e.to_string()))?;

        self.next_seq += 1;
        debug!(%id, "appended transaction to ledger");
        Ok(id)
    }
}
