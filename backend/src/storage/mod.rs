//! # Storage Module
//!
//! SQLite persistence for the two record collections and the preference
//! table. Repositories hand out full snapshots; all date and day filtering
//! happens in memory in the domain layer.

pub mod connection;
pub mod expense_repository;
pub mod fixed_expense_repository;
pub mod preference_repository;
pub mod traits;

pub use connection::DbConnection;
pub use expense_repository::ExpenseRepository;
pub use fixed_expense_repository::FixedExpenseRepository;
pub use preference_repository::PreferenceRepository;
pub use traits::PreferenceStore;
