//! Path management for spending-report
//!
//! Resolves where the settings file lives and where input exports and
//! generated reports are read from and written to.
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDING_REPORT_HOME` environment variable (if set)
//! 2. The platform data directory (`~/.local/share/spending-report` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::ReportError;

/// Environment variable overriding the base directory
pub const HOME_ENV_VAR: &str = "SPENDING_REPORT_HOME";

/// Manages all paths used by spending-report
#[derive(Debug, Clone)]
pub struct ReportPaths {
    /// Base directory for settings, inputs and outputs
    base_dir: PathBuf,
}

impl ReportPaths {
    /// Create a new ReportPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined for the
    /// platform default and the override variable is not set.
    pub fn new() -> Result<Self, ReportError> {
        let base_dir = match std::env::var(HOME_ENV_VAR) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create ReportPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory bank exports are read from by default
    pub fn input_dir(&self) -> PathBuf {
        self.base_dir.join("input")
    }

    /// Directory reports are written to by default
    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join("output")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base, input and output directories exist
    pub fn ensure_directories(&self) -> Result<(), ReportError> {
        for dir in [self.base_dir.clone(), self.input_dir(), self.output_dir()] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                ReportError::Io(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }
        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default base directory based on platform
fn resolve_default_path() -> Result<PathBuf, ReportError> {
    ProjectDirs::from("", "", "spending-report")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ReportError::Config("Could not determine a home directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.input_dir(), temp_dir.path().join("input"));
        assert_eq!(paths.output_dir(), temp_dir.path().join("output"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(HOME_ENV_VAR, custom_path);
        let paths = ReportPaths::new().unwrap();
        env::remove_var(HOME_ENV_VAR);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ReportPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.input_dir().exists());
        assert!(paths.output_dir().exists());
        assert!(!paths.is_initialized());
    }
}
