//! Loan amortization.
//!
//! - `frequency` - Payment frequencies and period lengths
//! - `types` - Loan parameters, schedule entries and results
//! - `engine` - Rate conversion, installment formula and schedule generation
//! - `error` - Loan calculation errors

pub mod engine;
pub mod error;
pub mod frequency;
pub mod types;

#[cfg(test)]
mod props;

pub use engine::{
    MAX_PAYMENT_COUNT, build_schedule, calculate_loan, calculate_loan_or_default,
    installment_amount, payment_count, payment_date, periodic_rate,
};
pub use error::LoanError;
pub use frequency::PaymentFrequency;
pub use types::{
    AmortizationEntry, AmortizationSchedule, EmiResult, LoanOutcome, LoanParams, LoanSummary,
};
