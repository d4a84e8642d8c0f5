//! CLI command for showing and initializing the configuration

use clap::Args;

use crate::config::{ReportPaths, Settings};
use crate::error::ReportResult;

/// Arguments of `config`
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Write the default settings file if none exists
    #[arg(long)]
    pub init: bool,
}

/// Handle `config`
pub fn handle_config_command(
    paths: &ReportPaths,
    settings: &Settings,
    args: ConfigArgs,
) -> ReportResult<()> {
    if args.init {
        if paths.is_initialized() {
            println!(
                "Settings file already exists: {}",
                paths.settings_file().display()
            );
        } else {
            Settings::default().save(paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
            println!(
                "Place the bank export in {} or pass --input.",
                paths.input_dir().display()
            );
        }
        return Ok(());
    }

    println!("{}", describe(paths, settings)?);
    Ok(())
}

/// Resolved paths followed by the effective settings
pub fn describe(paths: &ReportPaths, settings: &Settings) -> ReportResult<String> {
    let mut out = String::new();
    out.push_str("Spending Report Configuration\n");
    out.push_str("=============================\n");
    out.push_str(&format!("Base directory:   {}\n", paths.base_dir().display()));
    out.push_str(&format!("Input directory:  {}\n", paths.input_dir().display()));
    out.push_str(&format!("Output directory: {}\n", paths.output_dir().display()));
    out.push_str(&format!(
        "Settings file:    {}{}\n",
        paths.settings_file().display(),
        if paths.is_initialized() {
            ""
        } else {
            " (not written, using defaults)"
        }
    ));
    out.push('\n');
    out.push_str("Settings:\n");
    out.push_str(&serde_json::to_string_pretty(settings)?);
    Ok(out)
}
