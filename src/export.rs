//! CSV Export
//!
//! Writes the currently filtered transaction list as CSV and reads it back.
//! Columns: `ID,Amount,Type,Status,Date,Description`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

use crate::model::{timestamp, Id, Transaction, TransactionStatus};

/// Header row, in column order
pub const HEADER: [&str; 6] = ["ID", "Amount", "Type", "Status", "Date", "Description"];

/// One exported row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedRow {
    #[serde(rename = "ID")]
    pub id: Id,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Status")]
    pub status: TransactionStatus,
    #[serde(rename = "Date", with = "timestamp")]
    pub date: DateTime<Utc>,
    #[serde(rename = "Description")]
    pub description: String,
}

impl ExportedRow {
    pub fn from_transaction(t: &Transaction, viewer: Id) -> Self {
        Self {
            id: t.id,
            amount: t.amount,
            kind: t.label_for(viewer),
            status: t.status.clone(),
            date: t.timestamp,
            description: t.description.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unexpected header: {0}")]
    InvalidHeader(String),
}

/// Write a header and one row per transaction
pub fn write_csv<W: io::Write>(
    writer: W,
    transactions: &[Transaction],
    viewer: Id,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for t in transactions {
        csv_writer.serialize(ExportedRow::from_transaction(t, viewer))?;
    }
    csv_writer.flush()?;

    tracing::debug!("Exported {} transactions", transactions.len());
    Ok(transactions.len())
}

pub fn to_csv_string(transactions: &[Transaction], viewer: Id) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, transactions, viewer)?;
    String::from_utf8(buffer).map_err(|e| ExportError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Parse an exported file, checking the header first
pub fn read_csv<R: io::Read>(reader: R) -> Result<Vec<ExportedRow>, ExportError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.iter().ne(HEADER.iter().copied()) {
        return Err(ExportError::InvalidHeader(
            headers.iter().collect::<Vec<_>>().join(","),
        ));
    }

    csv_reader
        .deserialize()
        .map(|row| row.map_err(ExportError::from))
        .collect()
}

/// `transactions-2024-05-31.csv`
pub fn default_filename(now: DateTime<Utc>) -> String {
    format!("transactions-{}.csv", now.format("%Y-%m-%d"))
}
