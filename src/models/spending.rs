//! Derived spending tables
//!
//! Rows produced by the aggregation functions in `analysis`. Every amount in
//! these rows is an expense magnitude (positive) unless the field says income.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::month::YearMonth;

/// Cumulative spending of one analysis month up to and including a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBalance {
    pub month: YearMonth,
    pub date: NaiveDate,
    /// Expenses booked on this day
    pub spent: Money,
    /// Expenses booked in this month up to this day
    pub cumulative: Money,
}

impl DailyBalance {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

/// A ranked expense transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSpending {
    pub month: YearMonth,
    pub booking_date: NaiveDate,
    pub counterparty: String,
    pub category: String,
    pub sub_category: String,
    pub amount: Money,
    /// Dense rank within the ranking scope, starting at 1
    pub rank: u32,
}

/// Spending of one main category in one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpending {
    pub month: YearMonth,
    pub category: String,
    pub total: Money,
    pub mean: Money,
    pub count: usize,
}

/// Spending of one sub-category in one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategorySpending {
    pub month: YearMonth,
    pub category: String,
    pub sub_category: String,
    pub total: Money,
    pub mean: Money,
    pub count: usize,
}

/// Income and expense totals of one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeExpense {
    pub month: YearMonth,
    pub income: Money,
    pub expense: Money,
}

impl IncomeExpense {
    /// Income minus expenses
    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}
