//! CLI command for exporting the report tables
//!
//! Runs the same selection as `generate` but writes the derived tables as
//! CSV, JSON or YAML instead of a PDF.

use std::path::PathBuf;

use clap::Args;

use super::selection::SelectionArgs;
use crate::config::{ReportPaths, RunConfig, Settings};
use crate::display::format_summary;
use crate::error::ReportResult;
use crate::export::ExportFormat;
use crate::pipeline;

/// Arguments of `export`
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file (a directory for CSV)
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Handle `export`
pub fn handle_export_command(
    paths: &ReportPaths,
    settings: &Settings,
    args: ExportArgs,
) -> ReportResult<()> {
    let config = RunConfig::resolve(settings, paths, args.selection.overrides())?;
    let (data, written) = pipeline::export(&config, args.format, &args.output)?;

    println!("{}", format_summary(&data));
    println!();
    match args.format {
        ExportFormat::Csv => {
            println!("Tables exported to: {}", args.output.display());
            for path in &written {
                println!("  {}", path.display());
            }
        }
        ExportFormat::Json | ExportFormat::Yaml => {
            println!("Tables exported to: {}", args.output.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ExportArgs,
    }

    #[test]
    fn test_format_defaults_to_json() {
        let harness = Harness::try_parse_from(["test", "--output", "tables.json"]).unwrap();
        assert_eq!(harness.args.format, ExportFormat::Json);
        assert_eq!(harness.args.output, PathBuf::from("tables.json"));
    }

    #[test]
    fn test_format_and_selection() {
        let harness = Harness::try_parse_from([
            "test",
            "--format",
            "csv",
            "--output",
            "tables",
            "--all-accounts",
        ])
        .unwrap();
        assert_eq!(harness.args.format, ExportFormat::Csv);
        assert!(harness.args.selection.all_accounts);
    }

    #[test]
    fn test_output_is_required() {
        assert!(Harness::try_parse_from(["test", "--format", "yaml"]).is_err());
    }
}
