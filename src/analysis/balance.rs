//! Monthly running balance
//!
//! Cumulative spending per analysis month, day by day. The running total
//! starts from zero in each month.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use tracing::debug;

use super::expenses;
use crate::models::{DailyBalance, Money, Transaction, YearMonth};

/// Cumulative expense sum per (month, day), reset at every month start
///
/// Output is sorted by date; rows of different analysis months that share a
/// booking date are ordered by month.
pub fn monthly_running_balance(transactions: &[Transaction]) -> Vec<DailyBalance> {
    let mut per_day: BTreeMap<(YearMonth, NaiveDate), Money> = BTreeMap::new();
    for (txn, magnitude) in expenses(transactions) {
        *per_day
            .entry((txn.analysis_month, txn.booking_date))
            .or_default() += magnitude;
    }

    // BTreeMap order is (month, date), so each month's days arrive ascending
    let mut running: HashMap<YearMonth, Money> = HashMap::new();
    let mut rows: Vec<DailyBalance> = per_day
        .into_iter()
        .map(|((month, date), spent)| {
            let cumulative = running.entry(month).or_default();
            *cumulative += spent;
            DailyBalance {
                month,
                date,
                spent,
                cumulative: *cumulative,
            }
        })
        .collect();

    rows.sort_by(|a, b| a.date.cmp(&b.date).then(a.month.cmp(&b.month)));

    debug!(rows = rows.len(), "Computed monthly running balance");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{date, month, txn};

    #[test]
    fn test_running_balance_accumulates_within_month() {
        let transactions = vec![txn(2025, 2, 1, -1000), txn(2025, 2, 2, -500)];

        let rows = monthly_running_balance(&transactions);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month, month("2025-02"));
        assert_eq!(rows[0].day(), 1);
        assert_eq!(rows[0].cumulative, Money::from_cents(1000));
        assert_eq!(rows[1].day(), 2);
        assert_eq!(rows[1].cumulative, Money::from_cents(1500));
    }

    #[test]
    fn test_running_balance_resets_each_month() {
        let transactions = vec![
            txn(2025, 1, 30, -2000),
            txn(2025, 1, 31, -1000),
            txn(2025, 2, 1, -300),
        ];

        let rows = monthly_running_balance(&transactions);

        assert_eq!(rows[1].cumulative, Money::from_cents(3000));
        assert_eq!(rows[2].month, month("2025-02"));
        assert_eq!(rows[2].cumulative, Money::from_cents(300));
    }

    #[test]
    fn test_same_day_expenses_are_summed_and_income_ignored() {
        let transactions = vec![
            txn(2025, 3, 5, -250),
            txn(2025, 3, 5, -750),
            txn(2025, 3, 5, 100000),
            txn(2025, 3, 6, 0),
        ];

        let rows = monthly_running_balance(&transactions);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].spent, Money::from_cents(1000));
        assert_eq!(rows[0].cumulative, Money::from_cents(1000));
    }

    #[test]
    fn test_sorted_by_date_regardless_of_input_order() {
        let transactions = vec![
            txn(2025, 2, 20, -100),
            txn(2025, 1, 3, -100),
            txn(2025, 2, 2, -100),
        ];

        let rows = monthly_running_balance(&transactions);
        let dates: Vec<_> = rows.iter().map(|r| r.date).collect();

        assert_eq!(
            dates,
            vec![date(2025, 1, 3), date(2025, 2, 2), date(2025, 2, 20)]
        );
    }

    #[test]
    fn test_cumulative_never_decreases_within_a_month() {
        let amounts = [-1234, -1, -99999, -50, -777, -3, -12000, -456];
        let transactions: Vec<_> = amounts
            .iter()
            .enumerate()
            .flat_map(|(i, cents)| {
                let day = (i as u32 * 7) % 28 + 1;
                vec![txn(2024, 12, day, *cents), txn(2025, 1, day, *cents * 2)]
            })
            .collect();

        let rows = monthly_running_balance(&transactions);

        let mut last: HashMap<YearMonth, Money> = HashMap::new();
        for row in &rows {
            let previous = last.insert(row.month, row.cumulative).unwrap_or_default();
            assert!(row.cumulative >= previous, "decreased at {:?}", row);
        }
    }
}
