//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the report pipeline.

pub mod config;
pub mod export;
pub mod generate;
pub mod selection;

pub use config::{handle_config_command, ConfigArgs};
pub use export::{handle_export_command, ExportArgs};
pub use generate::{handle_generate_command, GenerateArgs};
pub use selection::SelectionArgs;
