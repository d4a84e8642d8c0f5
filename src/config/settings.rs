//! User settings for spending-report
//!
//! The handful of constants a report run depends on: which export to read,
//! how its columns are named, which account and sub-categories to keep, and
//! the thresholds and axis limits used by the report pages. Every field has a
//! default so a partial or missing `config.json` still yields a usable run.

use serde::{Deserialize, Serialize};

use super::paths::ReportPaths;
use crate::error::ReportError;
use crate::loader::ColumnNames;
use crate::report::ReportLayout;

/// Selection of the transactions that go into a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionSettings {
    /// Reference account to report on (None reports on every account)
    #[serde(default = "default_account")]
    pub account: Option<String>,

    /// Whether the excluded sub-categories are dropped
    #[serde(default = "default_true")]
    pub exclude_sub_categories: bool,

    /// Sub-categories left out of the report, e.g. one-off renovation costs
    #[serde(default = "default_excluded_sub_categories")]
    pub excluded_sub_categories: Vec<String>,

    /// Number of months before the reporting month that are loaded
    #[serde(default = "default_lookback_months")]
    pub lookback_months: u32,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            account: default_account(),
            exclude_sub_categories: true,
            excluded_sub_categories: default_excluded_sub_categories(),
            lookback_months: default_lookback_months(),
        }
    }
}

/// Thresholds and visual limits of the report pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Number of dense ranks in the top expenses table
    #[serde(default = "default_top_spending")]
    pub top_spending: u32,

    /// Number of dense ranks per category in the detailed layout
    #[serde(default = "default_top_per_category")]
    pub top_per_category: u32,

    /// Previous months drawn as grey reference lines in the balance chart
    #[serde(default = "default_balance_reference_months")]
    pub balance_reference_months: u32,

    /// Whether category charts are clipped to the axis limits below
    #[serde(default = "default_true")]
    pub clip_axes: bool,

    /// Upper axis limit of the category chart, in currency units
    #[serde(default = "default_category_axis_max")]
    pub category_axis_max: f64,

    /// Upper axis limit of the sub-category chart, in currency units
    #[serde(default = "default_sub_category_axis_max")]
    pub sub_category_axis_max: f64,

    /// Page layout variant
    #[serde(default)]
    pub layout: ReportLayout,

    /// Currency symbol shown next to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_spending: default_top_spending(),
            top_per_category: default_top_per_category(),
            balance_reference_months: default_balance_reference_months(),
            clip_axes: true,
            category_axis_max: default_category_axis_max(),
            sub_category_axis_max: default_sub_category_axis_max(),
            layout: ReportLayout::default(),
            currency_symbol: default_currency(),
        }
    }
}

/// User settings for spending-report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Export file read when no input is given, relative to the input directory
    #[serde(default = "default_input_file")]
    pub input_file: String,

    /// Worksheet to read (None derives it from the file name)
    #[serde(default)]
    pub sheet_name: Option<String>,

    /// Header names of the required columns
    #[serde(default)]
    pub columns: ColumnNames,

    /// Field delimiter used when the input is a CSV export
    #[serde(default = "default_csv_delimiter")]
    pub csv_delimiter: char,

    /// Transaction selection
    #[serde(default)]
    pub selection: SelectionSettings,

    /// Report thresholds and layout
    #[serde(default)]
    pub report: ReportSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_input_file() -> String {
    "Export-Alle_Buchungen.xlsx".to_string()
}

fn default_csv_delimiter() -> char {
    ';'
}

fn default_account() -> Option<String> {
    Some("Girokonto".to_string())
}

fn default_excluded_sub_categories() -> Vec<String> {
    vec!["Bauen / Renovieren".to_string()]
}

fn default_lookback_months() -> u32 {
    11
}

fn default_top_spending() -> u32 {
    10
}

fn default_top_per_category() -> u32 {
    3
}

fn default_balance_reference_months() -> u32 {
    5
}

fn default_category_axis_max() -> f64 {
    750.0
}

fn default_sub_category_axis_max() -> f64 {
    1000.0
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            input_file: default_input_file(),
            sheet_name: None,
            columns: ColumnNames::default(),
            csv_delimiter: default_csv_delimiter(),
            selection: SelectionSettings::default(),
            report: ReportSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &ReportPaths) -> Result<Self, ReportError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ReportError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ReportError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ReportPaths) -> Result<(), ReportError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ReportError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            ReportError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Reject values no run could use
    pub fn validate(&self) -> Result<(), ReportError> {
        if !self.csv_delimiter.is_ascii() {
            return Err(ReportError::Config(format!(
                "CSV delimiter must be a single ASCII character, got '{}'",
                self.csv_delimiter
            )));
        }
        if self.report.category_axis_max <= 0.0 || self.report.sub_category_axis_max <= 0.0 {
            return Err(ReportError::Config(
                "Axis limits must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.selection.account.as_deref(), Some("Girokonto"));
        assert!(settings.selection.exclude_sub_categories);
        assert_eq!(settings.selection.lookback_months, 11);
        assert_eq!(settings.report.top_spending, 10);
        assert_eq!(settings.report.top_per_category, 3);
        assert_eq!(settings.report.category_axis_max, 750.0);
        assert_eq!(settings.report.sub_category_axis_max, 1000.0);
        assert_eq!(settings.report.layout, ReportLayout::Standard);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.selection.lookback_months = 5;
        settings.report.layout = ReportLayout::Detailed;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.selection.lookback_months, 5);
        assert_eq!(loaded.report.layout, ReportLayout::Detailed);
    }

    #[test]
    fn test_partial_file_takes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{"selection": {"account": null}, "report": {"top_spending": 5}}"#,
        )
        .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.selection.account, None);
        assert_eq!(loaded.selection.lookback_months, 11);
        assert_eq!(loaded.report.top_spending, 5);
        assert_eq!(loaded.report.currency_symbol, "€");
        assert_eq!(loaded.columns, ColumnNames::default());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_non_positive_axis() {
        let mut settings = Settings::default();
        settings.report.category_axis_max = 0.0;
        assert!(settings.validate().is_err());
    }
}
