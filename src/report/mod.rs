//! Report module for spending-report
//!
//! `ReportData` holds every derived table of one run. It is built once from
//! the filtered transactions and then handed to the PDF assembler, the export
//! writers and the terminal summary.

pub mod layout;
pub mod pdf;
pub mod tables;

pub use pdf::PdfAssembler;
pub use tables::TableData;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::{
    category_spending, income_expense, monthly_running_balance, previous_months,
    sub_category_spending, top_spending, top_spending_per_category, unmatched_months,
};
use crate::config::ReportOptions;
use crate::models::{
    CategorySpending, DailyBalance, IncomeExpense, Money, SubCategorySpending, TopSpending,
    Transaction, YearMonth,
};

/// Page layout variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportLayout {
    /// Charts and the top expenses table
    #[default]
    Standard,
    /// Adds a page with the per-category tables
    Detailed,
}

/// Derived tables of one report run
#[derive(Debug, Clone)]
pub struct ReportData {
    /// Reporting month
    pub month: YearMonth,
    /// Previous months drawn as reference lines in the balance chart
    pub reference_months: Vec<YearMonth>,
    /// Running balance of every month in the window
    pub balance: Vec<DailyBalance>,
    /// Income and expense totals of every month in the window
    pub income_expense: Vec<IncomeExpense>,
    /// Months with only income or only expenses, missing from `income_expense`
    pub unmatched_months: Vec<YearMonth>,
    /// Top expenses of the reporting month
    pub top_spending: Vec<TopSpending>,
    /// Top expenses per category of the reporting month
    pub top_per_category: Vec<TopSpending>,
    /// Category totals of the reporting month
    pub categories: Vec<CategorySpending>,
    /// Sub-category totals of the reporting month
    pub sub_categories: Vec<SubCategorySpending>,
    /// Number of transactions in the reporting month
    pub transaction_count: usize,
    /// Thresholds and layout the tables were derived with
    pub options: ReportOptions,
}

impl ReportData {
    /// Derive every table from the filtered transactions of the window
    ///
    /// Balance and income/expense cover the whole window; the ranked and
    /// category tables only the reporting month.
    pub fn derive(month: YearMonth, options: &ReportOptions, transactions: &[Transaction]) -> Self {
        let in_month: Vec<Transaction> = transactions
            .iter()
            .filter(|txn| txn.analysis_month == month)
            .cloned()
            .collect();

        let income_expense = income_expense(transactions);
        let unmatched = unmatched_months(transactions, &income_expense);
        if !unmatched.is_empty() {
            let labels: Vec<String> = unmatched.iter().map(ToString::to_string).collect();
            warn!(
                months = %labels.join(", "),
                "Months with only income or only expenses are left out of the income/expense chart"
            );
        }

        let data = Self {
            month,
            reference_months: previous_months(month, options.balance_reference_months),
            balance: monthly_running_balance(transactions),
            income_expense,
            unmatched_months: unmatched,
            top_spending: top_spending(&in_month, options.top_spending),
            top_per_category: top_spending_per_category(&in_month, options.top_per_category),
            categories: category_spending(&in_month),
            sub_categories: sub_category_spending(&in_month),
            transaction_count: in_month.len(),
            options: options.clone(),
        };

        debug!(
            balance = data.balance.len(),
            income_expense = data.income_expense.len(),
            top_spending = data.top_spending.len(),
            top_per_category = data.top_per_category.len(),
            categories = data.categories.len(),
            sub_categories = data.sub_categories.len(),
            "Derived report tables"
        );

        data
    }

    /// Total expenses of the reporting month
    pub fn total_spent(&self) -> Money {
        self.categories.iter().map(|row| row.total).sum()
    }

    /// Income and expense totals of the reporting month, if both exist
    pub fn month_totals(&self) -> Option<&IncomeExpense> {
        self.income_expense.iter().find(|row| row.month == self.month)
    }

    /// Check if the reporting month has no transactions at all
    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::analysis::fixtures::{month, spend, txn};

    pub fn options() -> ReportOptions {
        ReportOptions {
            top_spending: 2,
            top_per_category: 1,
            balance_reference_months: 1,
            category_axis_max: Some(750.0),
            sub_category_axis_max: Some(1000.0),
            layout: ReportLayout::Standard,
            currency_symbol: "€".into(),
        }
    }

    /// Two months of bookings, reporting on February 2025
    pub fn report() -> ReportData {
        let transactions = vec![
            spend((2025, 1, 5), 4000, "Lebensmittel", "Supermarkt"),
            txn(2025, 1, 31, 250_000),
            spend((2025, 2, 1), 1000, "Lebensmittel", "Supermarkt"),
            spend((2025, 2, 2), 500, "Lebensmittel", "Bäckerei"),
            spend((2025, 2, 3), 90_000, "Wohnen", "Miete"),
            spend((2025, 2, 10), 1299, "Freizeit", "Streaming"),
            txn(2025, 2, 28, 250_000),
        ];
        ReportData::derive(month("2025-02"), &options(), &transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::report;
    use super::*;

    #[test]
    fn test_month_tables_limited_to_reporting_month() {
        let data = report();

        assert!(data.top_spending.iter().all(|r| r.month == data.month));
        assert!(data.categories.iter().all(|r| r.month == data.month));
        assert_eq!(data.categories.len(), 3);
        assert_eq!(data.sub_categories.len(), 4);
        assert_eq!(data.transaction_count, 5);
    }

    #[test]
    fn test_window_tables_cover_all_months() {
        let data = report();

        let months: Vec<String> = data.income_expense.iter().map(|r| r.month.to_string()).collect();
        assert_eq!(months, vec!["2025-01", "2025-02"]);
        assert!(data.balance.iter().any(|r| r.month.to_string() == "2025-01"));
        assert_eq!(data.reference_months.len(), 1);
        assert!(data.unmatched_months.is_empty());
    }

    #[test]
    fn test_top_spending_uses_threshold() {
        let data = report();
        let amounts: Vec<i64> = data.top_spending.iter().map(|r| r.amount.cents()).collect();
        assert_eq!(amounts, vec![90_000, 1299]);
        // one per category
        assert_eq!(data.top_per_category.len(), 3);
    }

    #[test]
    fn test_totals() {
        let data = report();
        assert_eq!(data.total_spent().cents(), 92_799);
        assert_eq!(data.month_totals().unwrap().income.cents(), 250_000);
        assert!(!data.is_empty());
    }

    #[test]
    fn test_layout_serialization() {
        let json = serde_json::to_string(&ReportLayout::Detailed).unwrap();
        assert_eq!(json, "\"detailed\"");
        let layout: ReportLayout = serde_json::from_str("\"standard\"").unwrap();
        assert_eq!(layout, ReportLayout::Standard);
    }
}
