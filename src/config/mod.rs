//! Configuration module for spending-report
//!
//! This module provides configuration management including:
//! - Platform path resolution with an environment override
//! - Persisted user settings
//! - The resolved configuration of a single run

pub mod paths;
pub mod run;
pub mod settings;

pub use paths::ReportPaths;
pub use run::{report_file, ReportOptions, RunConfig, RunOverrides};
pub use settings::Settings;
