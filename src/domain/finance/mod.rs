//! Finance module - Financial profile domain.
//!
//! A user's income, debts and expenses, keyed by username, plus the
//! read-only totals derived from them.

pub mod lenient;
mod payload;
mod profile;
mod summary;

pub use payload::{ProfilePayload, UserDetailsPayload};
pub use profile::{
    DebtEntry, ExpenseItem, Expenses, FinancialProfile, IncomeEntry, ProfileData, UserDetails,
};
pub use summary::FinancialSummary;
