//! Core data models for spending-report
//!
//! The loaded transaction rows, the value types they are built from, and the
//! derived tables the aggregation step produces.

pub mod money;
pub mod month;
pub mod spending;
pub mod transaction;

pub use money::Money;
pub use month::YearMonth;
pub use spending::{
    CategorySpending, DailyBalance, IncomeExpense, SubCategorySpending, TopSpending,
};
pub use transaction::Transaction;
