//! Display formatting for terminal output
//!
//! Text helpers shared by the summary and the report tables, and the
//! summary printed after each run.

pub mod format;
pub mod summary;

pub use format::{format_bar, format_percentage, percentage, truncate};
pub use summary::format_summary;
