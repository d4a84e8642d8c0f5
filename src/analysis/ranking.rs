//! Top expenses by dense rank
//!
//! Expenses are ranked by magnitude, largest first. Equal magnitudes share a
//! rank and the next distinct magnitude gets the following rank, so a
//! "top 3" may hold more than three rows when amounts tie.

use std::collections::BTreeMap;

use tracing::debug;

use super::expenses;
use crate::models::{Money, TopSpending, Transaction, YearMonth};

/// Top `n` dense-ranked expenses of every month
///
/// Ordered by month, then amount descending, then booking date.
pub fn top_spending(transactions: &[Transaction], n: u32) -> Vec<TopSpending> {
    let rows = rank_within(transactions, n, |txn| (txn.analysis_month, String::new()));
    debug!(rows = rows.len(), n, "Ranked top spending per month");
    rows
}

/// Top `n` dense-ranked expenses of every (month, main category) pair
///
/// Ordered by month, category, amount descending, then booking date.
pub fn top_spending_per_category(transactions: &[Transaction], n: u32) -> Vec<TopSpending> {
    let rows = rank_within(transactions, n, |txn| {
        (txn.analysis_month, txn.category.clone())
    });
    debug!(rows = rows.len(), n, "Ranked top spending per category");
    rows
}

/// Dense-rank expenses inside each group produced by `scope`
fn rank_within<F>(transactions: &[Transaction], n: u32, scope: F) -> Vec<TopSpending>
where
    F: Fn(&Transaction) -> (YearMonth, String),
{
    if n == 0 {
        return Vec::new();
    }

    let mut groups: BTreeMap<(YearMonth, String), Vec<(&Transaction, Money)>> = BTreeMap::new();
    for (txn, magnitude) in expenses(transactions) {
        groups.entry(scope(txn)).or_default().push((txn, magnitude));
    }

    let mut ranked = Vec::new();
    for (_, mut members) in groups {
        members.sort_by(|(a, a_amount), (b, b_amount)| {
            b_amount
                .cmp(a_amount)
                .then(a.booking_date.cmp(&b.booking_date))
                .then(a.counterparty.cmp(&b.counterparty))
        });

        for (txn, magnitude, rank) in dense_ranks(members) {
            if rank > n {
                break;
            }
            ranked.push(TopSpending {
                month: txn.analysis_month,
                booking_date: txn.booking_date,
                counterparty: txn.counterparty.clone(),
                category: txn.category.clone(),
                sub_category: txn.sub_category.clone(),
                amount: magnitude,
                rank,
            });
        }
    }
    ranked
}

/// Attach dense ranks to members already sorted by magnitude, largest first
fn dense_ranks<'a>(
    members: Vec<(&'a Transaction, Money)>,
) -> impl Iterator<Item = (&'a Transaction, Money, u32)> {
    let mut rank = 0;
    let mut previous: Option<Money> = None;
    members.into_iter().map(move |(txn, magnitude)| {
        if previous != Some(magnitude) {
            rank += 1;
            previous = Some(magnitude);
        }
        (txn, magnitude, rank)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{month, spend, txn};

    fn amounts(rows: &[TopSpending]) -> Vec<i64> {
        rows.iter().map(|r| r.amount.cents()).collect()
    }

    #[test]
    fn test_keeps_largest_expenses_in_order() {
        let transactions = vec![
            txn(2025, 2, 1, -100),
            txn(2025, 2, 2, -500),
            txn(2025, 2, 3, -300),
            txn(2025, 2, 4, -200),
            txn(2025, 2, 5, 900000),
        ];

        let rows = top_spending(&transactions, 3);

        assert_eq!(amounts(&rows), vec![500, 300, 200]);
        assert_eq!(rows.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_share_a_rank_and_next_rank_is_dense() {
        let transactions = vec![
            txn(2025, 2, 1, -500),
            txn(2025, 2, 2, -500),
            txn(2025, 2, 3, -300),
            txn(2025, 2, 4, -300),
            txn(2025, 2, 5, -100),
            txn(2025, 2, 6, -50),
        ];

        let rows = top_spending(&transactions, 2);

        // Four rows for a top 2: both ranks are fully tied
        assert_eq!(amounts(&rows), vec![500, 500, 300, 300]);
        assert_eq!(
            rows.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 1, 2, 2]
        );

        let rows = top_spending(&transactions, 3);
        assert_eq!(rows.last().map(|r| r.rank), Some(3));
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_ranking_is_per_month() {
        let transactions = vec![
            txn(2025, 1, 10, -10000),
            txn(2025, 1, 11, -9000),
            txn(2025, 2, 10, -10),
            txn(2025, 2, 11, -20),
        ];

        let rows = top_spending(&transactions, 1);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month, month("2025-01"));
        assert_eq!(rows[0].amount, Money::from_cents(10000));
        assert_eq!(rows[1].month, month("2025-02"));
        assert_eq!(rows[1].amount, Money::from_cents(20));
    }

    #[test]
    fn test_at_least_n_rows_when_enough_expenses() {
        let transactions: Vec<_> = (1..=15).map(|d| txn(2025, 3, d, -(d as i64 % 4) - 1)).collect();

        // Distinct magnitudes are 4, 3, 2 and 1 cents
        for n in 1..=4u32 {
            let rows = top_spending(&transactions, n);
            assert!(rows.len() >= n as usize);

            let threshold = 5 - n as i64;
            let at_or_above = transactions
                .iter()
                .filter(|t| t.amount.abs().cents() >= threshold)
                .count();
            assert_eq!(rows.len(), at_or_above);
        }
    }

    #[test]
    fn test_zero_n_returns_nothing() {
        let transactions = vec![txn(2025, 2, 1, -500)];
        assert!(top_spending(&transactions, 0).is_empty());
    }

    #[test]
    fn test_per_category_scopes_ranking() {
        let transactions = vec![
            spend((2025, 2, 1), 5000, "Wohnen", "Miete"),
            spend((2025, 2, 2), 300, "Wohnen", "Strom"),
            spend((2025, 2, 3), 120, "Wohnen", "Internet"),
            spend((2025, 2, 4), 80, "Freizeit", "Kino"),
            spend((2025, 2, 5), 80, "Freizeit", "Kino"),
            spend((2025, 2, 6), 20, "Freizeit", "Eis"),
        ];

        let rows = top_spending_per_category(&transactions, 1);

        let summary: Vec<_> = rows
            .iter()
            .map(|r| (r.category.as_str(), r.amount.cents(), r.rank))
            .collect();
        assert_eq!(
            summary,
            vec![("Freizeit", 80, 1), ("Freizeit", 80, 1), ("Wohnen", 5000, 1)]
        );
    }
}
