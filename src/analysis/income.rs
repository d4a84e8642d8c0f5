//! Income versus expenses per month

use std::collections::BTreeMap;

use tracing::debug;

use super::expenses;
use crate::models::{IncomeExpense, Money, Transaction, YearMonth};

/// Total income and total expenses per month
///
/// Both sides are summed separately and joined on the month. The join is an
/// inner join: a month with income but no expenses (or the reverse) is
/// dropped from the result. Sorted by month.
pub fn income_expense(transactions: &[Transaction]) -> Vec<IncomeExpense> {
    let mut income: BTreeMap<YearMonth, Money> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.is_income()) {
        *income.entry(txn.analysis_month).or_default() += txn.amount;
    }

    let mut spent: BTreeMap<YearMonth, Money> = BTreeMap::new();
    for (txn, magnitude) in expenses(transactions) {
        *spent.entry(txn.analysis_month).or_default() += magnitude;
    }

    let rows: Vec<_> = income
        .into_iter()
        .filter_map(|(month, income)| {
            spent.get(&month).map(|expense| IncomeExpense {
                month,
                income,
                expense: *expense,
            })
        })
        .collect();

    debug!(rows = rows.len(), "Computed income and expenses");
    rows
}

/// Months that have income or expenses but were dropped by the inner join
pub fn unmatched_months(transactions: &[Transaction], joined: &[IncomeExpense]) -> Vec<YearMonth> {
    let mut months: Vec<YearMonth> = transactions
        .iter()
        .filter(|t| !t.amount.is_zero())
        .map(|t| t.analysis_month)
        .filter(|m| !joined.iter().any(|row| row.month == *m))
        .collect();
    months.sort();
    months.dedup();
    months
}
