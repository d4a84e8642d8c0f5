//! Loading of bank transaction exports
//!
//! Reads the whole export into memory. Workbooks (xlsx, xls, ods) go through
//! calamine and `.csv` files through the csv crate; both share the same
//! header mapping and cell rules.

mod cells;
pub mod columns;
pub mod delimited;
pub mod workbook;

pub use columns::{ColumnIndex, ColumnNames};
pub use workbook::sheet_name_for;

use std::path::Path;

use tracing::info;

use crate::error::{LoadError, ReportResult};
use crate::models::Transaction;

/// How an export is read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Worksheet to read (None derives it from the file name)
    pub sheet_name: Option<String>,
    /// Header names of the required columns
    pub columns: ColumnNames,
    /// Field delimiter for CSV exports
    pub csv_delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            sheet_name: None,
            columns: ColumnNames::default(),
            csv_delimiter: b';',
        }
    }
}

/// Load all transactions from an export file
pub fn load_transactions(path: &Path, options: &LoadOptions) -> ReportResult<Vec<Transaction>> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()).into());
    }

    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    let transactions = if is_csv {
        delimited::load(path, options)?
    } else {
        workbook::load(path, options)?
    };

    info!(
        path = %path.display(),
        count = transactions.len(),
        "Loaded transactions"
    );
    Ok(transactions)
}
