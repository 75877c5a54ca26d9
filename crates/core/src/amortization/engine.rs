//! Amortization engine.
//!
//! Turns nominal loan terms into a periodic rate, a payment count, an installment
//! and a payment-by-payment schedule. Every function is pure: inputs in, new
//! values out.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use tracing::{debug, warn};

use super::error::LoanError;
use super::frequency::PaymentFrequency;
use super::types::{AmortizationEntry, AmortizationSchedule, EmiResult, LoanOutcome, LoanParams};

/// Largest schedule `calculate_loan` will build (100 years of monthly payments).
pub const MAX_PAYMENT_COUNT: u32 = 1200;

/// Converts an annual percentage rate to the fractional rate of one payment period.
///
/// Negative rates are passed through; validation belongs to the caller.
///
/// ```
/// use loanfx_core::amortization::{PaymentFrequency, periodic_rate};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(periodic_rate(dec!(12), PaymentFrequency::Monthly), dec!(0.01));
/// ```
#[must_use]
pub fn periodic_rate(annual_rate_percent: Decimal, frequency: PaymentFrequency) -> Decimal {
    annual_rate_percent / Decimal::ONE_HUNDRED / Decimal::from(frequency.periods_per_year())
}

/// Number of installments over `term_years`, truncated toward zero.
///
/// Negative terms give 0; terms too large for `u32` saturate.
#[must_use]
pub fn payment_count(term_years: Decimal, frequency: PaymentFrequency) -> u32 {
    let Some(periods) = term_years.checked_mul(Decimal::from(frequency.periods_per_year())) else {
        return u32::MAX;
    };
    if periods.is_sign_negative() {
        return 0;
    }
    periods.trunc().to_u32().unwrap_or(u32::MAX)
}

/// Installment of a fully amortizing loan.
///
/// `P * r / (1 - (1 + r)^-n)`, or `P / n` when `r` is zero. When `(1 + r)^n`
/// exceeds the decimal range, `(1 + r)^-n` is below its resolution and the
/// installment is `P * r`.
pub fn installment_amount(
    principal: Decimal,
    periodic_rate: Decimal,
    payment_count: u32,
) -> Result<Decimal, LoanError> {
    if payment_count == 0 {
        return Err(LoanError::NoPayments);
    }
    let count = Decimal::from(payment_count);

    if periodic_rate.is_zero() {
        return principal.checked_div(count).ok_or(LoanError::Overflow);
    }

    // (1 + r)^n / ((1 + r)^n - 1), which equals 1 / (1 - (1 + r)^-n)
    let factor = match (Decimal::ONE + periodic_rate).checked_powu(u64::from(payment_count)) {
        Some(growth) => {
            let denominator = growth - Decimal::ONE;
            // Rate below decimal resolution: (1 + r)^n rounds to 1.
            if denominator.is_zero() {
                return principal.checked_div(count).ok_or(LoanError::Overflow);
            }
            growth.checked_div(denominator).ok_or(LoanError::Overflow)?
        }
        None => Decimal::ONE,
    };

    principal
        .checked_mul(periodic_rate)
        .and_then(|v| v.checked_mul(factor))
        .ok_or(LoanError::Overflow)
}

/// Due date of payment `payment_index`, counted from `anchor_date`.
///
/// Each date is computed from the anchor rather than from the previous date, and
/// lands on the last day of the month when the anchor's day does not exist there
/// (Jan 31 + 1 month = Feb 28 or 29, Jan 31 + 2 months = Mar 31).
pub fn payment_date(
    anchor_date: NaiveDate,
    frequency: PaymentFrequency,
    payment_index: u32,
) -> Result<NaiveDate, LoanError> {
    let months = payment_index
        .checked_mul(frequency.months_per_period())
        .ok_or(LoanError::DateOutOfRange)?;
    anchor_date
        .checked_add_months(Months::new(months))
        .ok_or(LoanError::DateOutOfRange)
}

/// Builds the payment-by-payment schedule.
///
/// The balance after the final payment is set to exactly zero, absorbing whatever
/// residue the per-period rounding left behind.
pub fn build_schedule(
    principal: Decimal,
    periodic_rate: Decimal,
    installment_amount: Decimal,
    payment_count: u32,
    frequency: PaymentFrequency,
    anchor_date: NaiveDate,
) -> Result<AmortizationSchedule, LoanError> {
    let capacity = usize::try_from(payment_count.min(MAX_PAYMENT_COUNT)).unwrap_or_default();
    let mut entries = Vec::with_capacity(capacity);
    let mut balance = principal;
    let mut cumulative_interest = Decimal::ZERO;

    for payment_index in 1..=payment_count {
        let beginning_balance = balance;
        let interest_component = balance
            .checked_mul(periodic_rate)
            .ok_or(LoanError::Overflow)?;
        let principal_component = installment_amount
            .checked_sub(interest_component)
            .ok_or(LoanError::Overflow)?;
        balance = balance
            .checked_sub(principal_component)
            .ok_or(LoanError::Overflow)?;

        if payment_index == payment_count {
            balance = Decimal::ZERO;
        }

        cumulative_interest = cumulative_interest
            .checked_add(interest_component)
            .ok_or(LoanError::Overflow)?;

        entries.push(AmortizationEntry {
            payment_index,
            payment_date: payment_date(anchor_date, frequency, payment_index)?,
            beginning_balance,
            scheduled_payment: installment_amount,
            principal_component,
            interest_component,
            ending_balance: balance,
            cumulative_interest,
        });
    }

    Ok(AmortizationSchedule::from_entries(entries))
}

fn validate(params: &LoanParams) -> Result<u32, LoanError> {
    if params.principal <= Decimal::ZERO {
        return Err(LoanError::validation(
            "Principal amount must be greater than zero",
        ));
    }
    if params.annual_interest_rate < Decimal::ZERO {
        return Err(LoanError::validation("Interest rate cannot be negative"));
    }
    if params.term_years <= Decimal::ZERO {
        return Err(LoanError::validation("Loan term must be greater than zero"));
    }

    let count = payment_count(params.term_years, params.payment_frequency);
    if count == 0 {
        return Err(LoanError::validation(
            "Loan term is shorter than one payment period",
        ));
    }
    if count > MAX_PAYMENT_COUNT {
        return Err(LoanError::validation(format!(
            "Loan term exceeds the maximum of {MAX_PAYMENT_COUNT} payments"
        )));
    }
    Ok(count)
}

/// Computes installment, totals and schedule for a loan.
///
/// Payment dates are counted from `anchor_date`; the first payment falls one
/// period after it.
///
/// ```
/// use chrono::NaiveDate;
/// use loanfx_core::amortization::{LoanParams, PaymentFrequency, calculate_loan};
/// use rust_decimal_macros::dec;
///
/// let params = LoanParams::new(dec!(12000), dec!(0), dec!(1), PaymentFrequency::Monthly);
/// let anchor = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let result = calculate_loan(&params, anchor).unwrap();
/// assert_eq!(result.installment_amount, dec!(1000));
/// assert_eq!(result.amortization_schedule.len(), 12);
/// ```
pub fn calculate_loan(params: &LoanParams, anchor_date: NaiveDate) -> Result<EmiResult, LoanError> {
    let count = validate(params)?;
    let rate = periodic_rate(params.annual_interest_rate, params.payment_frequency);
    let installment = installment_amount(params.principal, rate, count)?;
    let schedule = build_schedule(
        params.principal,
        rate,
        installment,
        count,
        params.payment_frequency,
        anchor_date,
    )?;

    let total_payment = installment
        .checked_mul(Decimal::from(count))
        .ok_or(LoanError::Overflow)?;
    let total_interest = total_payment - params.principal;

    debug!(
        principal = %params.principal,
        annual_rate = %params.annual_interest_rate,
        frequency = %params.payment_frequency,
        payment_count = count,
        installment = %installment,
        "Loan calculated"
    );

    Ok(EmiResult {
        installment_amount: installment,
        total_payment_amount: total_payment,
        total_interest_amount: total_interest,
        amortization_schedule: schedule,
    })
}

/// Boundary form of [`calculate_loan`]: never fails.
///
/// On invalid input the zero result is returned together with the reason.
pub fn calculate_loan_or_default(params: &LoanParams, anchor_date: NaiveDate) -> LoanOutcome {
    match calculate_loan(params, anchor_date) {
        Ok(result) => LoanOutcome {
            result,
            error: None,
        },
        Err(err) => {
            warn!(error = %err, "Loan calculation rejected");
            LoanOutcome {
                result: EmiResult::zero(),
                error: Some(err.to_string()),
            }
        }
    }
}
