//! Loan data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::frequency::PaymentFrequency;

/// Input parameters for one loan calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanParams {
    /// Amount borrowed.
    pub principal: Decimal,
    /// Nominal annual interest rate in percent (e.g., 5 for 5%).
    pub annual_interest_rate: Decimal,
    /// Loan term in years. Fractional terms are allowed.
    pub term_years: Decimal,
    /// How often installments fall due.
    #[serde(default)]
    pub payment_frequency: PaymentFrequency,
}

impl LoanParams {
    /// Creates a new set of loan parameters.
    #[must_use]
    pub const fn new(
        principal: Decimal,
        annual_interest_rate: Decimal,
        term_years: Decimal,
        payment_frequency: PaymentFrequency,
    ) -> Self {
        Self {
            principal,
            annual_interest_rate,
            term_years,
            payment_frequency,
        }
    }
}

impl Default for LoanParams {
    /// 100,000 at 5% over 20 years, paid monthly.
    fn default() -> Self {
        Self {
            principal: Decimal::from(100_000),
            annual_interest_rate: Decimal::from(5),
            term_years: Decimal::from(20),
            payment_frequency: PaymentFrequency::Monthly,
        }
    }
}

/// One row of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationEntry {
    /// 1-based payment number.
    pub payment_index: u32,
    /// Date the payment falls due.
    pub payment_date: NaiveDate,
    /// Outstanding balance before this payment.
    pub beginning_balance: Decimal,
    /// Installment due for this period.
    pub scheduled_payment: Decimal,
    /// Part of the installment that repays principal.
    pub principal_component: Decimal,
    /// Part of the installment that pays interest.
    pub interest_component: Decimal,
    /// Outstanding balance after this payment.
    pub ending_balance: Decimal,
    /// Interest paid from the first payment through this one.
    pub cumulative_interest: Decimal,
}

/// Ordered payment-by-payment breakdown of a loan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmortizationSchedule(Vec<AmortizationEntry>);

impl AmortizationSchedule {
    pub(crate) fn from_entries(entries: Vec<AmortizationEntry>) -> Self {
        Self(entries)
    }

    /// All entries in payment order.
    #[must_use]
    pub fn entries(&self) -> &[AmortizationEntry] {
        &self.0
    }

    /// Number of payments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the schedule has no payments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First payment, if any.
    #[must_use]
    pub fn first(&self) -> Option<&AmortizationEntry> {
        self.0.first()
    }

    /// Final payment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&AmortizationEntry> {
        self.0.last()
    }

    /// Sum of the principal components of every payment.
    #[must_use]
    pub fn total_principal(&self) -> Decimal {
        self.0.iter().map(|e| e.principal_component).sum()
    }

    /// Total interest over the life of the loan.
    #[must_use]
    pub fn total_interest(&self) -> Decimal {
        self.last()
            .map_or(Decimal::ZERO, |entry| entry.cumulative_interest)
    }

    /// Iterates over the entries in payment order.
    pub fn iter(&self) -> std::slice::Iter<'_, AmortizationEntry> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a AmortizationSchedule {
    type Item = &'a AmortizationEntry;
    type IntoIter = std::slice::Iter<'a, AmortizationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Result of one loan calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiResult {
    /// Installment due each period.
    pub installment_amount: Decimal,
    /// Installment multiplied by the number of payments.
    pub total_payment_amount: Decimal,
    /// Total payment minus principal.
    pub total_interest_amount: Decimal,
    /// Payment-by-payment breakdown.
    pub amortization_schedule: AmortizationSchedule,
}

impl EmiResult {
    /// The all-zero result shown when a calculation fails.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Headline figures without the schedule.
    #[must_use]
    pub fn summary(&self) -> LoanSummary {
        let interest_share_percent = if self.total_payment_amount.is_zero() {
            Decimal::ZERO
        } else {
            self.total_interest_amount / self.total_payment_amount * Decimal::ONE_HUNDRED
        };

        LoanSummary {
            installment_amount: self.installment_amount,
            total_payment_amount: self.total_payment_amount,
            total_interest_amount: self.total_interest_amount,
            payment_count: u32::try_from(self.amortization_schedule.len()).unwrap_or(u32::MAX),
            interest_share_percent,
        }
    }
}

/// Headline figures of a loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    /// Installment due each period.
    pub installment_amount: Decimal,
    /// Total of all installments.
    pub total_payment_amount: Decimal,
    /// Total interest paid.
    pub total_interest_amount: Decimal,
    /// Number of installments.
    pub payment_count: u32,
    /// Share of the total payment that is interest, in percent.
    pub interest_share_percent: Decimal,
}

/// Boundary result of a loan calculation: a result is always present, and a failed
/// calculation carries the zero result together with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanOutcome {
    /// Computed figures, or the zero result on failure.
    pub result: EmiResult,
    /// Human-readable failure reason.
    pub error: Option<String>,
}

impl LoanOutcome {
    /// Returns true if the calculation failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
