//! CLI command for generating the PDF report

use std::path::PathBuf;

use clap::Args;

use super::selection::SelectionArgs;
use crate::charts::PlottersRenderer;
use crate::config::{ReportPaths, RunConfig, RunOverrides, Settings};
use crate::display::format_summary;
use crate::error::ReportResult;
use crate::pipeline;

/// Arguments of `generate`
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Directory the report is written to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Add the page of detail tables
    #[arg(short, long)]
    pub detailed: bool,
}

impl GenerateArgs {
    /// Overrides for this run
    pub fn overrides(self) -> RunOverrides {
        RunOverrides {
            output_dir: self.output_dir,
            detailed: self.detailed,
            ..self.selection.overrides()
        }
    }
}

/// Handle `generate`, also run when no subcommand is given
pub fn handle_generate_command(
    paths: &ReportPaths,
    settings: &Settings,
    args: GenerateArgs,
) -> ReportResult<()> {
    let config = RunConfig::resolve(settings, paths, args.overrides())?;
    let (data, path) = pipeline::generate(&config, &PlottersRenderer::new())?;

    println!("{}", format_summary(&data));
    println!();
    println!("Report written to: {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: GenerateArgs,
    }

    #[test]
    fn test_output_and_layout_flags() {
        let harness = Harness::try_parse_from([
            "test",
            "--month",
            "2024-11",
            "--output-dir",
            "/reports",
            "--detailed",
        ])
        .unwrap();
        let overrides = harness.args.overrides();

        assert_eq!(overrides.month.as_deref(), Some("2024-11"));
        assert_eq!(overrides.output_dir, Some(PathBuf::from("/reports")));
        assert!(overrides.detailed);
    }

    #[test]
    fn test_defaults_leave_settings_in_charge() {
        let overrides = GenerateArgs::default().overrides();
        assert_eq!(overrides.month, None);
        assert_eq!(overrides.input, None);
        assert!(!overrides.detailed);
        assert!(!overrides.all_accounts);
    }
}
