//! Spending per category and sub-category
//!
//! Groups expenses by month and category key and reports sum, mean and count.
//! Categories without expenses in a month are absent rather than zero-filled.

use std::collections::BTreeMap;

use tracing::debug;

use super::expenses;
use crate::models::{CategorySpending, Money, SubCategorySpending, Transaction};

/// Sum and count accumulated for one group
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    total: Money,
    count: usize,
}

impl Tally {
    fn add(&mut self, magnitude: Money) {
        self.total += magnitude;
        self.count += 1;
    }

    fn mean(&self) -> Money {
        Money::mean(self.total, self.count)
    }
}

/// Tally expense magnitudes per key, ordered by key
fn tally_by<K, F>(transactions: &[Transaction], key: F) -> BTreeMap<K, Tally>
where
    K: Ord,
    F: Fn(&Transaction) -> K,
{
    let mut tallies: BTreeMap<K, Tally> = BTreeMap::new();
    for (txn, magnitude) in expenses(transactions) {
        tallies.entry(key(txn)).or_default().add(magnitude);
    }
    tallies
}

/// Expense sum, mean and count per (month, main category)
///
/// Ordered by month, then category name.
pub fn category_spending(transactions: &[Transaction]) -> Vec<CategorySpending> {
    let rows: Vec<_> = tally_by(transactions, |txn| {
        (txn.analysis_month, txn.category.clone())
    })
    .into_iter()
    .map(|((month, category), tally)| CategorySpending {
        month,
        category,
        total: tally.total,
        mean: tally.mean(),
        count: tally.count,
    })
    .collect();

    debug!(rows = rows.len(), "Computed category spending");
    rows
}

/// Expense sum, mean and count per (month, main category, sub-category)
///
/// Ordered by month, category, then sub-category name.
pub fn sub_category_spending(transactions: &[Transaction]) -> Vec<SubCategorySpending> {
    let rows: Vec<_> = tally_by(transactions, |txn| {
        (
            txn.analysis_month,
            txn.category.clone(),
            txn.sub_category.clone(),
        )
    })
    .into_iter()
    .map(|((month, category, sub_category), tally)| SubCategorySpending {
        month,
        category,
        sub_category,
        total: tally.total,
        mean: tally.mean(),
        count: tally.count,
    })
    .collect();

    debug!(rows = rows.len(), "Computed sub-category spending");
    rows
}
