//! Flat record export of ledger snapshots plus CSV delivery helpers.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    errors::{LedgerError, Result},
    ledger::{Direction, Transaction},
};

/// One exported transaction. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
    #[serde(rename = "#")]
    pub id: u64,
    /// Raw signed numeral, e.g. `-350.50`.
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Type")]
    pub direction: Direction,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Date")]
    pub timestamp: String,
}

impl From<&Transaction> for ExportRecord {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id(),
            amount: txn.amount().to_string(),
            direction: txn.direction(),
            category: txn.category().to_string(),
            description: txn.description().to_string(),
            timestamp: txn.timestamp_label(),
        }
    }
}

pub struct LedgerExporter;

impl LedgerExporter {
    /// Builds one record per transaction in ascending id order.
    pub fn export(snapshot: &[Transaction]) -> Result<Vec<ExportRecord>> {
        if snapshot.is_empty() {
            return Err(LedgerError::EmptyLedger);
        }
        let mut records: Vec<ExportRecord> = snapshot.iter().map(ExportRecord::from).collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    /// Writes records as CSV with a header row.
    pub fn write_csv<W: Write>(records: &[ExportRecord], writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for record in records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Exports `snapshot` to `path`, staging through a temporary file so a failed
    /// write never leaves a truncated export behind.
    pub fn export_to_path(snapshot: &[Transaction], path: &Path) -> Result<usize> {
        let records = Self::export(snapshot)?;
        let tmp = tmp_path(path);
        let outcome = File::create(&tmp)
            .map_err(LedgerError::from)
            .and_then(|file| Self::write_csv(&records, file))
            .and_then(|()| fs::rename(&tmp, path).map_err(LedgerError::from));
        if let Err(err) = outcome {
            let _ = fs::remove_file(&tmp);
            tracing::warn!(path = %path.display(), error = %err, "export failed");
            return Err(err);
        }
        tracing::info!(path = %path.display(), records = records.len(), "ledger exported");
        Ok(records.len())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => "tmp".to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
