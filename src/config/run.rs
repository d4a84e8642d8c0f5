//! Per-run configuration
//!
//! A `RunConfig` is resolved once at process start from the settings file,
//! the resolved paths and the command-line overrides, and is then passed by
//! reference through the whole pipeline. Nothing reads global state after
//! this point.

use std::path::{Path, PathBuf};

use super::paths::ReportPaths;
use super::settings::Settings;
use crate::analysis::{report_window, TransactionFilter};
use crate::error::ReportError;
use crate::loader::LoadOptions;
use crate::models::YearMonth;
use crate::report::ReportLayout;

/// Values given on the command line that take precedence over settings
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub month: Option<String>,
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub account: Option<String>,
    pub all_accounts: bool,
    pub include_excluded: bool,
    pub lookback: Option<u32>,
    pub detailed: bool,
}

/// Thresholds the aggregation and layout steps need
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub top_spending: u32,
    pub top_per_category: u32,
    pub balance_reference_months: u32,
    pub category_axis_max: Option<f64>,
    pub sub_category_axis_max: Option<f64>,
    pub layout: ReportLayout,
    pub currency_symbol: String,
}

/// Fully resolved configuration of one report run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub month: YearMonth,
    pub lookback_months: u32,
    pub input_file: PathBuf,
    pub output_dir: PathBuf,
    pub load: LoadOptions,
    pub account: Option<String>,
    pub excluded_sub_categories: Vec<String>,
    pub options: ReportOptions,
}

impl RunConfig {
    /// Resolve the configuration of this run
    ///
    /// The reporting month defaults to the month before the current one, the
    /// last month whose bookings are complete.
    pub fn resolve(
        settings: &Settings,
        paths: &ReportPaths,
        overrides: RunOverrides,
    ) -> Result<Self, ReportError> {
        settings.validate()?;

        let month = match overrides.month.as_deref() {
            Some(label) => YearMonth::parse(label)
                .map_err(|e| ReportError::Validation(e.to_string()))?,
            None => YearMonth::current().prev(),
        };

        let input_file = overrides
            .input
            .unwrap_or_else(|| paths.input_dir().join(&settings.input_file));

        let account = if overrides.all_accounts {
            None
        } else {
            overrides.account.or_else(|| settings.selection.account.clone())
        };

        let excluded_sub_categories =
            if overrides.include_excluded || !settings.selection.exclude_sub_categories {
                Vec::new()
            } else {
                settings.selection.excluded_sub_categories.clone()
            };

        let report = &settings.report;
        let layout = if overrides.detailed {
            ReportLayout::Detailed
        } else {
            report.layout
        };

        Ok(Self {
            month,
            lookback_months: overrides
                .lookback
                .unwrap_or(settings.selection.lookback_months),
            input_file,
            output_dir: overrides.output_dir.unwrap_or_else(|| paths.output_dir()),
            load: LoadOptions {
                sheet_name: settings.sheet_name.clone(),
                columns: settings.columns.clone(),
                csv_delimiter: settings.csv_delimiter as u8,
            },
            account,
            excluded_sub_categories,
            options: ReportOptions {
                top_spending: report.top_spending,
                top_per_category: report.top_per_category,
                balance_reference_months: report.balance_reference_months,
                category_axis_max: report.clip_axes.then_some(report.category_axis_max),
                sub_category_axis_max: report
                    .clip_axes
                    .then_some(report.sub_category_axis_max),
                layout,
                currency_symbol: report.currency_symbol.clone(),
            },
        })
    }

    /// Months loaded for this run, reporting month first
    pub fn window(&self) -> Vec<YearMonth> {
        report_window(self.month, self.lookback_months)
    }

    /// The selection applied to the loaded transactions
    pub fn filter(&self) -> TransactionFilter {
        TransactionFilter::new()
            .with_months(self.window())
            .with_account(self.account.clone())
            .excluding(self.excluded_sub_categories.clone())
    }

    /// Where the report PDF of this run is written
    pub fn report_path(&self) -> PathBuf {
        report_file(&self.output_dir, self.month)
    }
}

/// Deterministic report file path for a month
pub fn report_file(output_dir: &Path, month: YearMonth) -> PathBuf {
    output_dir.join(format!("Spending_Report_{}.pdf", month))
}
