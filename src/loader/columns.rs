//! Column mapping for bank exports
//!
//! The export is located by header name rather than position. All seven
//! columns are required; any others are ignored.

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Header names of the required columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub booking_date: String,
    pub amount: String,
    pub counterparty: String,
    pub category: String,
    pub sub_category: String,
    pub account: String,
    pub analysis_month: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            booking_date: "Buchungstag".to_string(),
            amount: "Betrag".to_string(),
            counterparty: "Beguenstigter/Auftraggeber".to_string(),
            category: "Analyse-Hauptkategorie".to_string(),
            sub_category: "Analyse-Unterkategorie".to_string(),
            account: "Name Referenzkonto".to_string(),
            analysis_month: "Analyse-Monat".to_string(),
        }
    }
}

impl ColumnNames {
    /// Locate every required column in a header row
    ///
    /// Fails with the full list of missing headers, not just the first.
    pub fn resolve<S: AsRef<str>>(&self, headers: &[S]) -> Result<ColumnIndex, LoadError> {
        let position = |name: &str| headers.iter().position(|h| h.as_ref().trim() == name.trim());

        let lookups = [
            (&self.booking_date, position(&self.booking_date)),
            (&self.amount, position(&self.amount)),
            (&self.counterparty, position(&self.counterparty)),
            (&self.category, position(&self.category)),
            (&self.sub_category, position(&self.sub_category)),
            (&self.account, position(&self.account)),
            (&self.analysis_month, position(&self.analysis_month)),
        ];

        let missing: Vec<String> = lookups
            .iter()
            .filter(|(_, found)| found.is_none())
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns(missing));
        }

        let [booking_date, amount, counterparty, category, sub_category, account, analysis_month] =
            lookups.map(|(_, found)| found.unwrap_or_default());

        Ok(ColumnIndex {
            booking_date,
            amount,
            counterparty,
            category,
            sub_category,
            account,
            analysis_month,
        })
    }
}

/// Positions of the required columns within a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub booking_date: usize,
    pub amount: usize,
    pub counterparty: usize,
    pub category: usize,
    pub sub_category: usize,
    pub account: usize,
    pub analysis_month: usize,
}
