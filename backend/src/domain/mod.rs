//! # Domain Module
//!
//! Business logic for the household budget calendar. Nothing here knows about
//! HTTP; storage is reached only through the repositories and the
//! [`PreferenceStore`](crate::storage::PreferenceStore) trait.
//!
//! ## Module Organization
//!
//! - **calendar**: month grid generation, day detail and current date
//! - **aggregation**: date normalization plus per-day and per-month totals
//! - **formatting**: intensity tiers, yen amounts and Japanese date labels
//! - **expense_service** / **fixed_expense_service**: validated CRUD
//! - **category_service**: the user's category list
//!
//! ## Business Rules
//!
//! - Amounts are whole yen and never negative
//! - Categories must be non-empty once trimmed
//! - A fixed expense's payment day lies in 1..=31 and never matches a day the
//!   month does not have
//! - The day total counts only recurring fixed expenses, while the month
//!   summary counts every fixed expense

pub mod aggregation;
pub mod calendar;
pub mod category_service;
pub mod errors;
pub mod expense_service;
pub mod fixed_expense_service;
pub mod formatting;

pub use aggregation::DisplayZone;
pub use calendar::CalendarService;
pub use category_service::CategoryService;
pub use errors::LedgerError;
pub use expense_service::ExpenseService;
pub use fixed_expense_service::FixedExpenseService;
