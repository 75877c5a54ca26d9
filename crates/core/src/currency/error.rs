//! Rate table error types.

use loanfx_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Structural problems in a supplied exchange rate table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateTableError {
    /// The table does not name its base currency.
    #[error("Rate table has no base currency code")]
    EmptyBaseCode,

    /// A rate is zero or negative.
    #[error("Rate for {code} must be positive, got {rate}")]
    NonPositiveRate {
        /// Currency code carrying the bad rate.
        code: String,
        /// The offending rate.
        rate: Decimal,
    },
}

impl From<RateTableError> for AppError {
    fn from(err: RateTableError) -> Self {
        Self::Validation(err.to_string())
    }
}
