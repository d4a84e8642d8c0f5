//! Export module for spending-report
//!
//! Writes the derived tables of a run instead of a PDF:
//! - CSV: one spreadsheet-compatible file per table
//! - JSON: machine-readable, schema versioned
//! - YAML: the JSON document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_report_csv, export_table_csv, Table};
pub use json::{export_report_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::error::{ReportError, ReportResult};
use crate::report::ReportData;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One CSV file per table, written into a directory
    Csv,
    /// JSON document
    Json,
    /// YAML document, human-readable
    Yaml,
}

/// Write the export of `data` to `output`
///
/// For CSV `output` is a directory; for JSON and YAML it is the file to
/// write. Returns the files written.
pub fn write_export(
    data: &ReportData,
    format: ExportFormat,
    output: &Path,
) -> ReportResult<Vec<PathBuf>> {
    match format {
        ExportFormat::Csv => export_report_csv(data, output),
        ExportFormat::Json | ExportFormat::Yaml => {
            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ReportError::Export(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }

            let file = File::create(output).map_err(|e| {
                ReportError::Export(format!(
                    "Failed to create file {}: {}",
                    output.display(),
                    e
                ))
            })?;
            let mut writer = BufWriter::new(file);

            if format == ExportFormat::Json {
                export_report_json(data, &mut writer, true)?;
            } else {
                export_report_yaml(data, &mut writer)?;
            }
            writer
                .flush()
                .map_err(|e| ReportError::Export(e.to_string()))?;

            Ok(vec![output.to_path_buf()])
        }
    }
}
