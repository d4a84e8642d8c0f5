//! Spreadsheet exports (xlsx, xls, ods) read through calamine

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::debug;

use super::cells::{parse_row, Cell};
use super::LoadOptions;
use crate::error::{LoadError, ReportError, ReportResult};
use crate::models::Transaction;

/// Sheet name the bank gives an export: the file stem with `-` replaced by `_`
pub fn sheet_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace('-', "_"))
        .unwrap_or_default()
}

/// Load every transaction row from a workbook
pub fn load(path: &Path, options: &LoadOptions) -> ReportResult<Vec<Transaction>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| ReportError::unreadable(path, e))?;

    let sheet = options
        .sheet_name
        .clone()
        .unwrap_or_else(|| sheet_name_for(path));

    let sheet_names = workbook.sheet_names();
    if !sheet_names.iter().any(|name| name == &sheet) {
        return Err(LoadError::MissingSheet {
            sheet,
            available: sheet_names.join(", "),
        }
        .into());
    }

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| ReportError::unreadable(path, e))?;
    debug!(sheet = %sheet, rows = range.height(), "Reading worksheet");

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .unwrap_or_default();
    let index = options.columns.resolve(&headers)?;

    let mut transactions = Vec::new();
    // header is row 1
    for (offset, row) in rows.enumerate() {
        let cells: Vec<Cell<'_>> = row.iter().map(cell).collect();
        if let Some(txn) = parse_row(offset + 2, &cells, &index, &options.columns)? {
            transactions.push(txn);
        }
    }

    Ok(transactions)
}

/// Map a calamine value onto the shared cell type
fn cell(data: &Data) -> Cell<'_> {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(text) | Data::DateTimeIso(text) | Data::DurationIso(text) => {
            Cell::from_text(text)
        }
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::DateTime(value) => match value.as_datetime() {
            Some(datetime) => Cell::Date(datetime.date()),
            None => Cell::Number(value.as_f64()),
        },
        Data::Bool(value) => Cell::Other(value.to_string()),
        Data::Error(err) => Cell::Other(err.to_string()),
    }
}
