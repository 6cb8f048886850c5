//! Canonical CSV rendering of a ledger snapshot.

use std::{fs, path::Path};

use chrono::NaiveDate;
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};

use crate::domain::transaction::Transaction;
use crate::errors::{LedgerError, Result};

pub const DELIMITER: u8 = b',';
/// Byte-order marker so spreadsheet tools detect UTF-8.
pub const BOM: &str = "\u{feff}";
pub const HEADER: [&str; 6] = [
    "วันที่",
    "ประเภท",
    "หมวดหมู่",
    "รายละเอียด",
    "จำนวนเงิน",
    "ตรวจสอบแล้ว",
];
pub const RECONCILED_MARK: &str = "ใช่";
pub const UNRECONCILED_MARK: &str = "ยัง";

/// One exported row with every field recovered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub date: String,
    pub direction: String,
    pub category: String,
    pub description: String,
    pub amount: String,
    pub reconciled: bool,
}

pub struct ExportFormatter;

impl ExportFormatter {
    pub fn file_name(export_date: NaiveDate) -> String {
        format!("resort_finance_{}.csv", export_date.format("%Y-%m-%d"))
    }

    /// Header plus one row per transaction in snapshot order, prefixed with a BOM.
    pub fn to_delimited_text(snapshot: &[Transaction]) -> Result<String> {
        let mut writer = WriterBuilder::new()
            .delimiter(DELIMITER)
            .quote_style(QuoteStyle::Never)
            .from_writer(Vec::new());
        writer.write_record(HEADER)?;
        for txn in snapshot {
            let amount = format!("{:.2}", txn.amount);
            let description = sanitize_free_text(&txn.description);
            writer.write_record([
                txn.date.format("%Y-%m-%d").to_string().as_str(),
                txn.direction.code(),
                txn.category.label(),
                description.as_str(),
                amount.as_str(),
                if txn.reconciled {
                    RECONCILED_MARK
                } else {
                    UNRECONCILED_MARK
                },
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| LedgerError::Export(err.to_string()))?;
        let body = String::from_utf8(bytes).map_err(|err| LedgerError::Export(err.to_string()))?;
        Ok(format!("{BOM}{body}"))
    }

    pub fn write_to(path: &Path, snapshot: &[Transaction]) -> Result<()> {
        let text = Self::to_delimited_text(snapshot)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, text)?;
        Ok(())
    }

    /// Reads back text produced by [`ExportFormatter::to_delimited_text`].
    pub fn parse_rows(text: &str) -> Result<Vec<ExportRow>> {
        let body = text.strip_prefix(BOM).unwrap_or(text);
        let mut reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .quoting(false)
            .has_headers(true)
            .from_reader(body.as_bytes());
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            if record.len() != HEADER.len() {
                return Err(LedgerError::Export(format!(
                    "expected {} fields, found {}",
                    HEADER.len(),
                    record.len()
                )));
            }
            rows.push(ExportRow {
                date: record[0].to_string(),
                direction: record[1].to_string(),
                category: record[2].to_string(),
                description: record[3].to_string(),
                amount: record[4].to_string(),
                reconciled: &record[5] == RECONCILED_MARK,
            });
        }
        Ok(rows)
    }
}

/// Delimiters and line breaks become spaces so every row splits into six fields.
fn sanitize_free_text(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            ',' | '\n' | '\r' => ' ',
            '"' => '\'',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_string()
}
