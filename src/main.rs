use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use spending_report::cli::{
    handle_config_command, handle_export_command, handle_generate_command, ConfigArgs,
    ExportArgs, GenerateArgs,
};
use spending_report::config::{ReportPaths, Settings};

#[derive(Parser)]
#[command(
    name = "spending-report",
    author = "Kaylee Beyene",
    version,
    about = "Monthly spending report generator for bank transaction exports",
    long_about = "spending-report reads a bank transaction export, selects the bookings \
                  of one reference account and reporting month, and writes a PDF with \
                  balance, income/expense and category charts plus a table of the \
                  largest expenses."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the PDF report (default)
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Export the report tables as CSV, JSON or YAML
    Export(ExportArgs),

    /// Show current configuration and paths
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Initialize paths and settings
    let paths = ReportPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Generate(args)) => handle_generate_command(&paths, &settings, args)?,
        Some(Commands::Export(args)) => handle_export_command(&paths, &settings, args)?,
        Some(Commands::Config(args)) => handle_config_command(&paths, &settings, args)?,
        None => handle_generate_command(&paths, &settings, GenerateArgs::default())?,
    }

    Ok(())
}
