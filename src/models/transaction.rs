//! Transaction model
//!
//! One row of the bank export. Amounts are signed: negative amounts are
//! expenses, positive amounts are income.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::month::YearMonth;

/// A booked bank transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Booking date
    pub booking_date: NaiveDate,

    /// Amount (positive for income, negative for expenses)
    pub amount: Money,

    /// Payee or payer as printed by the bank
    #[serde(default)]
    pub counterparty: String,

    /// Main category
    #[serde(default)]
    pub category: String,

    /// Sub-category within the main category
    #[serde(default)]
    pub sub_category: String,

    /// Name of the reference account the transaction was booked on
    #[serde(default)]
    pub account: String,

    /// Month the transaction is analysed under
    pub analysis_month: YearMonth,
}

impl Transaction {
    /// Create a transaction whose analysis month is the booking month
    pub fn new(booking_date: NaiveDate, amount: Money) -> Self {
        Self {
            booking_date,
            amount,
            counterparty: String::new(),
            category: String::new(),
            sub_category: String::new(),
            account: String::new(),
            analysis_month: YearMonth::from_date(booking_date),
        }
    }

    /// Set the counterparty
    pub fn with_counterparty(mut self, counterparty: impl Into<String>) -> Self {
        self.counterparty = counterparty.into();
        self
    }

    /// Set main and sub-category
    pub fn with_categories(
        mut self,
        category: impl Into<String>,
        sub_category: impl Into<String>,
    ) -> Self {
        self.category = category.into();
        self.sub_category = sub_category.into();
        self
    }

    /// Set the reference account
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = account.into();
        self
    }

    /// Override the analysis month
    pub fn with_analysis_month(mut self, month: YearMonth) -> Self {
        self.analysis_month = month;
        self
    }

    /// Check if this transaction is an expense
    pub fn is_expense(&self) -> bool {
        self.amount.is_negative()
    }

    /// Check if this transaction is income
    pub fn is_income(&self) -> bool {
        self.amount.is_positive()
    }

    /// Positive magnitude of an expense, `None` for income and zero rows
    pub fn expense(&self) -> Option<Money> {
        self.is_expense().then(|| self.amount.abs())
    }

    /// Day of month of the booking date
    pub fn day(&self) -> u32 {
        self.booking_date.day()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_derives_analysis_month() {
        let txn = Transaction::new(date(2025, 2, 14), Money::from_cents(-1250));
        assert_eq!(txn.analysis_month, YearMonth::new(2025, 2).unwrap());
        assert_eq!(txn.day(), 14);
    }

    #[test]
    fn test_expense_flips_sign() {
        let expense = Transaction::new(date(2025, 2, 1), Money::from_cents(-1250));
        assert!(expense.is_expense());
        assert_eq!(expense.expense(), Some(Money::from_cents(1250)));

        let income = Transaction::new(date(2025, 2, 1), Money::from_cents(300000));
        assert!(income.is_income());
        assert_eq!(income.expense(), None);

        let zero = Transaction::new(date(2025, 2, 1), Money::zero());
        assert!(!zero.is_income() && !zero.is_expense());
    }

    #[test]
    fn test_builders() {
        let txn = Transaction::new(date(2025, 1, 31), Money::from_cents(-500))
            .with_counterparty("REWE")
            .with_categories("Lebensmittel", "Supermarkt")
            .with_account("Girokonto")
            .with_analysis_month(YearMonth::new(2025, 2).unwrap());

        assert_eq!(txn.counterparty, "REWE");
        assert_eq!(txn.category, "Lebensmittel");
        assert_eq!(txn.sub_category, "Supermarkt");
        assert_eq!(txn.account, "Girokonto");
        assert_eq!(txn.analysis_month.to_string(), "2025-02");
    }
}
