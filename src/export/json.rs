//! JSON Export functionality
//!
//! Exports the derived tables of a report run with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};
use crate::models::{
    CategorySpending, DailyBalance, IncomeExpense, SubCategorySpending, TopSpending, YearMonth,
};
use crate::report::ReportData;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// All derived tables of one report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Reporting month
    pub month: YearMonth,

    /// Running balance of every month in the window
    pub balance: Vec<DailyBalance>,

    /// Income and expense totals per month
    pub income_expense: Vec<IncomeExpense>,

    /// Top expenses of the reporting month
    pub top_spending: Vec<TopSpending>,

    /// Top expenses per category of the reporting month
    pub top_per_category: Vec<TopSpending>,

    /// Category totals of the reporting month
    pub categories: Vec<CategorySpending>,

    /// Sub-category totals of the reporting month
    pub sub_categories: Vec<SubCategorySpending>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Transactions in the reporting month
    pub transaction_count: usize,

    /// Earliest month with data in the window
    pub first_month: Option<YearMonth>,

    /// Months dropped from the income/expense table
    pub unmatched_months: Vec<YearMonth>,
}

impl ReportExport {
    /// Create an export from derived report data
    pub fn from_report(data: &ReportData) -> Self {
        let first_month = data
            .balance
            .iter()
            .map(|row| row.month)
            .chain(data.income_expense.iter().map(|row| row.month))
            .min();

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            month: data.month,
            balance: data.balance.clone(),
            income_expense: data.income_expense.clone(),
            top_spending: data.top_spending.clone(),
            top_per_category: data.top_per_category.clone(),
            categories: data.categories.clone(),
            sub_categories: data.sub_categories.clone(),
            metadata: ExportMetadata {
                transaction_count: data.transaction_count,
                first_month,
                unmatched_months: data.unmatched_months.clone(),
            },
        }
    }
}

/// Export the report tables to JSON
pub fn export_report_json<W: Write>(
    data: &ReportData,
    writer: &mut W,
    pretty: bool,
) -> ReportResult<()> {
    let export = ReportExport::from_report(data);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ReportError::Export(e.to_string()))?;

    Ok(())
}
