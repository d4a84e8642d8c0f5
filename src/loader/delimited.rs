//! Delimited text exports read through the csv crate

use std::path::Path;

use csv::ReaderBuilder;

use super::cells::{parse_row, Cell};
use super::LoadOptions;
use crate::error::{ReportError, ReportResult};
use crate::models::Transaction;

/// Load every transaction row from a CSV export
pub fn load(path: &Path, options: &LoadOptions) -> ReportResult<Vec<Transaction>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.csv_delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ReportError::unreadable(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ReportError::unreadable(path, e))?
        .iter()
        .map(str::to_string)
        .collect();
    let index = options.columns.resolve(headers.as_slice())?;

    let mut transactions = Vec::new();
    for (offset, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ReportError::unreadable(path, e))?;
        let cells: Vec<Cell<'_>> = record.iter().map(Cell::from_text).collect();
        if let Some(txn) = parse_row(offset + 2, &cells, &index, &options.columns)? {
            transactions.push(txn);
        }
    }

    Ok(transactions)
}
