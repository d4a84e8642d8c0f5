//! YAML Export functionality
//!
//! The same document as the JSON export, for reading by eye.

use std::io::Write;

use crate::error::{ReportError, ReportResult};
use crate::export::json::ReportExport;
use crate::report::ReportData;

/// Export the report tables to YAML
pub fn export_report_yaml<W: Write>(data: &ReportData, writer: &mut W) -> ReportResult<()> {
    let export = ReportExport::from_report(data);

    let header = format!(
        "# Spending report tables for {}\n# Generated: {}\n# App Version: {}\n#\n# Amounts are in cents.\n\n",
        export.month, export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| ReportError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| ReportError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::report;

    #[test]
    fn test_yaml_export() {
        let mut buffer = Vec::new();
        export_report_yaml(&report(), &mut buffer).unwrap();

        let yaml = String::from_utf8(buffer).unwrap();
        assert!(yaml.starts_with("# Spending report tables for 2025-02"));
        assert!(yaml.contains("top_spending:"));

        let parsed: ReportExport = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.month.to_string(), "2025-02");
        assert_eq!(parsed.sub_categories.len(), 4);
    }
}
