//! Loan calculation error types.

use loanfx_shared::AppError;
use thiserror::Error;

/// Errors raised while computing a loan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanError {
    /// Loan parameters failed validation.
    #[error("{0}")]
    Validation(String),

    /// An installment was requested for zero payments.
    #[error("Payment count must be at least one")]
    NoPayments,

    /// An intermediate value exceeded decimal range.
    #[error("Loan calculation overflowed the supported numeric range")]
    Overflow,

    /// A payment date fell outside the supported calendar range.
    #[error("Payment date is outside the supported calendar range")]
    DateOutOfRange,
}

impl LoanError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<LoanError> for AppError {
    fn from(err: LoanError) -> Self {
        match err {
            LoanError::Validation(message) => Self::Validation(message),
            other => Self::Validation(other.to_string()),
        }
    }
}
