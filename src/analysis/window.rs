//! Report window and transaction selection
//!
//! The report covers one month plus a fixed number of months before it. The
//! filter narrows the loaded export to that window, one reference account and
//! the sub-categories that are not excluded.

use tracing::debug;

use crate::models::{Transaction, YearMonth};

/// The `count` calendar months strictly before `month`, most recent first
pub fn previous_months(month: YearMonth, count: u32) -> Vec<YearMonth> {
    (1..=count).map(|i| month.minus_months(i)).collect()
}

/// The reporting month followed by its `lookback` previous months
pub fn report_window(month: YearMonth, lookback: u32) -> Vec<YearMonth> {
    let mut window = Vec::with_capacity(lookback as usize + 1);
    window.push(month);
    window.extend(previous_months(month, lookback));
    window
}

/// Selection applied to the loaded transactions before aggregation
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Analysis months to keep (empty keeps every month)
    pub months: Vec<YearMonth>,
    /// Reference account to keep (None keeps every account)
    pub account: Option<String>,
    /// Sub-categories to drop
    pub excluded_sub_categories: Vec<String>,
}

impl TransactionFilter {
    /// Create a filter that keeps everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given months
    pub fn with_months(mut self, months: Vec<YearMonth>) -> Self {
        self.months = months;
        self
    }

    /// Restrict to one reference account
    pub fn with_account(mut self, account: Option<String>) -> Self {
        self.account = account;
        self
    }

    /// Drop the given sub-categories
    pub fn excluding(mut self, sub_categories: Vec<String>) -> Self {
        self.excluded_sub_categories = sub_categories;
        self
    }

    /// Check whether a single transaction passes the filter
    pub fn matches(&self, txn: &Transaction) -> bool {
        if !self.months.is_empty() && !self.months.contains(&txn.analysis_month) {
            return false;
        }

        if let Some(account) = &self.account {
            if &txn.account != account {
                return false;
            }
        }

        !self
            .excluded_sub_categories
            .iter()
            .any(|excluded| excluded == &txn.sub_category)
    }

    /// Return the matching transactions as a new table
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let kept: Vec<Transaction> = transactions
            .iter()
            .filter(|txn| self.matches(txn))
            .cloned()
            .collect();

        debug!(
            loaded = transactions.len(),
            kept = kept.len(),
            "Filtered transactions"
        );
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{month, spend, txn};

    #[test]
    fn test_previous_months_crosses_year_boundary() {
        let months: Vec<String> = previous_months(month("2025-01"), 3)
            .iter()
            .map(|m| m.to_string())
            .collect();
        assert_eq!(months, vec!["2024-12", "2024-11", "2024-10"]);
    }

    #[test]
    fn test_previous_months_zero_is_empty() {
        assert!(previous_months(month("2025-01"), 0).is_empty());
    }

    #[test]
    fn test_report_window_starts_with_reporting_month() {
        let window = report_window(month("2025-02"), 11);
        assert_eq!(window.len(), 12);
        assert_eq!(window[0], month("2025-02"));
        assert_eq!(window[1], month("2025-01"));
        assert_eq!(window[11], month("2024-03"));
    }

    #[test]
    fn test_filter_by_window_account_and_exclusion() {
        let transactions = vec![
            spend((2025, 2, 1), 100, "Wohnen", "Miete").with_account("Girokonto"),
            spend((2025, 2, 2), 200, "Haus", "Bauen / Renovieren").with_account("Girokonto"),
            spend((2025, 2, 3), 300, "Wohnen", "Miete").with_account("Kreditkarte"),
            spend((2024, 1, 3), 400, "Wohnen", "Miete").with_account("Girokonto"),
            txn(2025, 1, 31, 5000).with_account("Girokonto"),
        ];

        let filter = TransactionFilter::new()
            .with_months(report_window(month("2025-02"), 11))
            .with_account(Some("Girokonto".into()))
            .excluding(vec!["Bauen / Renovieren".into()]);

        let kept = filter.apply(&transactions);

        let amounts: Vec<i64> = kept.iter().map(|t| t.amount.cents()).collect();
        assert_eq!(amounts, vec![-100, 5000]);
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let transactions = vec![txn(2020, 1, 1, -1), txn(2025, 5, 1, 1)];
        assert_eq!(TransactionFilter::new().apply(&transactions), transactions);
    }
}
