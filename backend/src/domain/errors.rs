/// Largest amount a single record may carry (one trillion yen)
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Failures from the record services
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Amount cannot be negative")]
    NegativeAmount,
    #[error("Amount {0} exceeds the maximum of {max}", max = MAX_AMOUNT)]
    AmountTooLarge(i64),
    #[error("Category cannot be empty")]
    EmptyCategory,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Payment day must be between 1 and 31, got {0}")]
    InvalidPaymentDay(i32),
    #[error("Record {0} not found")]
    NotFound(i64),
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    /// True for errors caused by the caller's input rather than the server
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::NegativeAmount
                | LedgerError::AmountTooLarge(_)
                | LedgerError::EmptyCategory
                | LedgerError::InvalidDate(_)
                | LedgerError::InvalidPaymentDay(_)
        )
    }

    /// Reject amounts outside `0..=MAX_AMOUNT`
    pub fn check_amount(amount: i64) -> Result<(), LedgerError> {
        if amount < 0 {
            Err(LedgerError::NegativeAmount)
        } else if amount > MAX_AMOUNT {
            Err(LedgerError::AmountTooLarge(amount))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_amount_bounds() {
        assert!(LedgerError::check_amount(0).is_ok());
        assert!(LedgerError::check_amount(MAX_AMOUNT).is_ok());
        assert!(matches!(LedgerError::check_amount(-1), Err(LedgerError::NegativeAmount)));
        assert!(matches!(
            LedgerError::check_amount(MAX_AMOUNT + 1),
            Err(LedgerError::AmountTooLarge(_))
        ));
        assert!(LedgerError::AmountTooLarge(i64::MAX).is_validation());
    }
}
