//! Aggregation of transactions into report tables
//!
//! Every function here is pure: it borrows the transaction slice and returns a
//! freshly built table. Unless noted otherwise, only expenses are considered,
//! and their amounts are sign-flipped to positive magnitudes before any sum,
//! mean or rank is taken.

pub mod balance;
pub mod category;
pub mod income;
pub mod ranking;
pub mod window;

pub use balance::monthly_running_balance;
pub use category::{category_spending, sub_category_spending};
pub use income::{income_expense, unmatched_months};
pub use ranking::{top_spending, top_spending_per_category};
pub use window::{previous_months, report_window, TransactionFilter};

use crate::models::{Money, Transaction};

/// Iterate over the expenses of a table as (transaction, magnitude) pairs
pub(crate) fn expenses(
    transactions: &[Transaction],
) -> impl Iterator<Item = (&Transaction, Money)> + '_ {
    transactions
        .iter()
        .filter_map(|txn| txn.expense().map(|magnitude| (txn, magnitude)))
}
