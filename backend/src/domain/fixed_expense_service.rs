//! CRUD operations for fixed (day-of-month) expenses.

use shared::{FixedExpense, FixedExpenseRequest};
use tracing::info;

use crate::domain::errors::LedgerError;
use crate::storage::FixedExpenseRepository;

const PAYMENT_DAY_RANGE: std::ops::RangeInclusive<i32> = 1..=31;

#[derive(Clone)]
pub struct FixedExpenseService {
    repository: FixedExpenseRepository,
}

impl FixedExpenseService {
    pub fn new(repository: FixedExpenseRepository) -> Self {
        Self { repository }
    }

    pub fn validate(request: FixedExpenseRequest) -> Result<FixedExpenseRequest, LedgerError> {
        LedgerError::check_amount(request.amount)?;

        let category = request.category.trim().to_string();
        if category.is_empty() {
            return Err(LedgerError::EmptyCategory);
        }

        if !PAYMENT_DAY_RANGE.contains(&request.payment_day) {
            return Err(LedgerError::InvalidPaymentDay(request.payment_day));
        }

        Ok(FixedExpenseRequest { category, ..request })
    }

    /// Full snapshot, ordered by payment day
    pub async fn list_fixed_expenses(&self) -> Result<Vec<FixedExpense>, LedgerError> {
        Ok(self.repository.list_fixed_expenses().await?)
    }

    pub async fn create_fixed_expense(
        &self,
        request: FixedExpenseRequest,
    ) -> Result<FixedExpense, LedgerError> {
        let request = Self::validate(request)?;
        let fixed = request.into_fixed_expense(None);

        let id = self.repository.store_fixed_expense(&fixed).await?;
        info!(
            "Stored fixed expense {} ({} on day {}, recurring: {})",
            id, fixed.amount, fixed.payment_day, fixed.is_recurring
        );

        Ok(FixedExpense { id: Some(id), ..fixed })
    }

    pub async fn update_fixed_expense(
        &self,
        id: i64,
        request: FixedExpenseRequest,
    ) -> Result<FixedExpense, LedgerError> {
        let request = Self::validate(request)?;
        let fixed = request.into_fixed_expense(Some(id));

        if !self.repository.update_fixed_expense(id, &fixed).await? {
            return Err(LedgerError::NotFound(id));
        }
        info!("Updated fixed expense {}", id);

        Ok(fixed)
    }

    pub async fn delete_fixed_expense(&self, id: i64) -> Result<(), LedgerError> {
        if !self.repository.delete_fixed_expense(id).await? {
            return Err(LedgerError::NotFound(id));
        }
        info!("Deleted fixed expense {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConnection;

    async fn setup_test() -> FixedExpenseService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        FixedExpenseService::new(FixedExpenseRepository::new(db))
    }

    fn request(amount: i64, payment_day: i32, is_recurring: bool) -> FixedExpenseRequest {
        FixedExpenseRequest {
            amount,
            category: "家賃".to_string(),
            payment_day,
            is_recurring,
            memo: Some("monthly".to_string()),
        }
    }

    #[test]
    fn test_validate_payment_day_bounds() {
        assert!(FixedExpenseService::validate(request(1, 1, true)).is_ok());
        assert!(FixedExpenseService::validate(request(1, 31, true)).is_ok());
        assert!(matches!(
            FixedExpenseService::validate(request(1, 0, true)),
            Err(LedgerError::InvalidPaymentDay(0))
        ));
        assert!(matches!(
            FixedExpenseService::validate(request(1, 32, true)),
            Err(LedgerError::InvalidPaymentDay(32))
        ));
    }

    #[test]
    fn test_validate_amount_and_category() {
        assert!(matches!(
            FixedExpenseService::validate(request(-100, 5, true)),
            Err(LedgerError::NegativeAmount)
        ));
        assert!(matches!(
            FixedExpenseService::validate(request(i64::MAX, 5, true)),
            Err(LedgerError::AmountTooLarge(_))
        ));

        let mut blank = request(100, 5, true);
        blank.category = " ".to_string();
        assert!(matches!(FixedExpenseService::validate(blank), Err(LedgerError::EmptyCategory)));
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let service = setup_test().await;

        let rent = service.create_fixed_expense(request(80000, 27, true)).await.unwrap();
        let one_off = service.create_fixed_expense(request(3000, 3, false)).await.unwrap();

        let all = service.list_fixed_expenses().await.unwrap();
        assert_eq!(all, vec![one_off, rent]);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let service = setup_test().await;

        assert!(matches!(
            service.update_fixed_expense(7, request(1, 1, true)).await,
            Err(LedgerError::NotFound(7))
        ));
        assert!(matches!(
            service.delete_fixed_expense(7).await,
            Err(LedgerError::NotFound(7))
        ));
    }

    #[tokio::test]
    async fn test_update_toggles_recurrence() {
        let service = setup_test().await;

        let created = service.create_fixed_expense(request(5000, 10, true)).await.unwrap();
        let id = created.id.unwrap();

        let updated = service.update_fixed_expense(id, request(5000, 10, false)).await.unwrap();
        assert!(!updated.is_recurring);

        let stored = service.list_fixed_expenses().await.unwrap();
        assert!(!stored[0].is_recurring);
    }
}
