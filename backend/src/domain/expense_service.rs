//! CRUD operations for ad-hoc expenses.

use shared::{Expense, ExpenseRequest};
use tracing::info;

use crate::domain::aggregation::RawDate;
use crate::domain::errors::LedgerError;
use crate::storage::ExpenseRepository;

#[derive(Clone)]
pub struct ExpenseService {
    repository: ExpenseRepository,
}

impl ExpenseService {
    pub fn new(repository: ExpenseRepository) -> Self {
        Self { repository }
    }

    /// Check a request and return it with the category and date trimmed
    pub fn validate(request: ExpenseRequest) -> Result<ExpenseRequest, LedgerError> {
        LedgerError::check_amount(request.amount)?;

        let category = request.category.trim().to_string();
        if category.is_empty() {
            return Err(LedgerError::EmptyCategory);
        }

        let date = request.date.trim().to_string();
        if RawDate::parse(&date).is_none() {
            return Err(LedgerError::InvalidDate(request.date));
        }

        Ok(ExpenseRequest {
            category,
            date,
            ..request
        })
    }

    /// Full snapshot, oldest first
    pub async fn list_expenses(&self) -> Result<Vec<Expense>, LedgerError> {
        Ok(self.repository.list_expenses().await?)
    }

    pub async fn create_expense(&self, request: ExpenseRequest) -> Result<Expense, LedgerError> {
        let request = Self::validate(request)?;
        let expense = request.into_expense(None);

        let id = self.repository.store_expense(&expense).await?;
        info!("Stored expense {} ({} on {})", id, expense.amount, expense.date);

        Ok(Expense { id: Some(id), ..expense })
    }

    pub async fn update_expense(&self, id: i64, request: ExpenseRequest) -> Result<Expense, LedgerError> {
        let request = Self::validate(request)?;
        let expense = request.into_expense(Some(id));

        if !self.repository.update_expense(id, &expense).await? {
            return Err(LedgerError::NotFound(id));
        }
        info!("Updated expense {}", id);

        Ok(expense)
    }

    pub async fn delete_expense(&self, id: i64) -> Result<(), LedgerError> {
        if !self.repository.delete_expense(id).await? {
            return Err(LedgerError::NotFound(id));
        }
        info!("Deleted expense {}", id);
        Ok(())
    }
}
