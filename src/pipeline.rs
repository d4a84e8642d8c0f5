//! The report run
//!
//! One synchronous pass: load the export, keep the transactions of the report
//! window, derive the tables, then write the PDF or the export. Every step
//! reads the same `RunConfig`.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::charts::ChartRenderer;
use crate::config::RunConfig;
use crate::error::ReportResult;
use crate::export::{write_export, ExportFormat};
use crate::loader::load_transactions;
use crate::report::{PdfAssembler, ReportData};

/// Load, filter and derive the tables of a run
pub fn prepare(config: &RunConfig) -> ReportResult<ReportData> {
    info!(
        month = %config.month,
        input = %config.input_file.display(),
        "Preparing report"
    );

    let transactions = load_transactions(&config.input_file, &config.load)?;

    let filter = config.filter();
    let selected = filter.apply(&transactions);
    info!(
        loaded = transactions.len(),
        selected = selected.len(),
        account = config.account.as_deref().unwrap_or("all"),
        "Selected transactions for the report window"
    );

    Ok(ReportData::derive(config.month, &config.options, &selected))
}

/// Produce the PDF report of a run
pub fn generate(config: &RunConfig, renderer: &dyn ChartRenderer) -> ReportResult<(ReportData, PathBuf)> {
    let data = prepare(config)?;
    let path = PdfAssembler::new().assemble(&data, renderer, &config.output_dir)?;
    Ok((data, path))
}

/// Write the derived tables of a run in an export format
pub fn export(
    config: &RunConfig,
    format: ExportFormat,
    output: &Path,
) -> ReportResult<(ReportData, Vec<PathBuf>)> {
    let data = prepare(config)?;
    let written = write_export(&data, format, output)?;
    info!(files = written.len(), format = ?format, "Exported report tables");
    Ok((data, written))
}
