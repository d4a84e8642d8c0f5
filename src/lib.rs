//! spending-report - Monthly spending reports from bank transaction exports
//!
//! This library reads a bank's transaction export (an `.xlsx` workbook or a
//! `.csv` file), derives the monthly tables of one reporting month and writes
//! them as a two or three page PDF, or as CSV/JSON/YAML exports.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths, persisted settings and the per-run configuration
//! - `error`: Custom error types
//! - `models`: Money, months, transactions and the derived table rows
//! - `loader`: Spreadsheet and CSV input
//! - `analysis`: Selection and aggregation of transactions
//! - `charts`: Chart rendering behind the `ChartRenderer` trait
//! - `report`: Table layout, pagination and PDF assembly
//! - `export`: CSV, JSON and YAML export of the derived tables
//! - `display`: Terminal summary
//! - `pipeline`: The load, filter, derive and write sequence
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use spending_report::charts::PlottersRenderer;
//! use spending_report::config::{ReportPaths, RunConfig, RunOverrides, Settings};
//!
//! let paths = ReportPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let config = RunConfig::resolve(&settings, &paths, RunOverrides::default())?;
//! let (_data, pdf) = spending_report::pipeline::generate(&config, &PlottersRenderer::new())?;
//! ```

pub mod analysis;
pub mod charts;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod report;

pub use error::{LoadError, ReportError, ReportResult};
