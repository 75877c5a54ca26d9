//! Property-based tests for the amortization engine.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::engine::{calculate_loan, payment_count};
use super::frequency::PaymentFrequency;
use super::types::LoanParams;

/// Strategy to generate principals (1.00 to 10,000,000.00).
fn principal() -> impl Strategy<Value = Decimal> {
    (100i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate annual rates (0.00% to 30.00%), zero included often.
fn annual_rate() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::ZERO),
        4 => (0i64..=3000i64).prop_map(|bps| Decimal::new(bps, 2)),
    ]
}

/// Strategy to generate terms (1 to 30 years, in quarter years).
fn term_years() -> impl Strategy<Value = Decimal> {
    (4i64..=120i64).prop_map(|quarters| Decimal::new(quarters * 25, 2))
}

fn frequency() -> impl Strategy<Value = PaymentFrequency> {
    prop::sample::select(PaymentFrequency::ALL.to_vec())
}

fn loan_params() -> impl Strategy<Value = LoanParams> {
    (principal(), annual_rate(), term_years(), frequency())
        .prop_map(|(p, r, t, f)| LoanParams::new(p, r, t, f))
}

fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
}

const TOLERANCE: Decimal = dec!(0.000001);

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Total repayment never falls below the principal when the rate is non-negative.
    #[test]
    fn prop_total_payment_covers_principal(params in loan_params()) {
        let result = calculate_loan(&params, anchor()).unwrap();
        prop_assert!(
            result.total_payment_amount + TOLERANCE >= params.principal,
            "total {} < principal {}",
            result.total_payment_amount,
            params.principal
        );
        prop_assert!(result.total_interest_amount + TOLERANCE >= Decimal::ZERO);
    }

    /// The final balance is exactly zero.
    #[test]
    fn prop_final_balance_is_zero(params in loan_params()) {
        let result = calculate_loan(&params, anchor()).unwrap();
        let last = result.amortization_schedule.last().unwrap();
        prop_assert_eq!(last.ending_balance, Decimal::ZERO);
    }

    /// Principal components add back up to the principal.
    #[test]
    fn prop_principal_components_sum_to_principal(params in loan_params()) {
        let result = calculate_loan(&params, anchor()).unwrap();
        let diff = (result.amortization_schedule.total_principal() - params.principal).abs();
        prop_assert!(diff < TOLERANCE, "principal drift {}", diff);
    }

    /// One entry per payment, balances chained, components non-negative.
    #[test]
    fn prop_schedule_is_well_formed(params in loan_params()) {
        let result = calculate_loan(&params, anchor()).unwrap();
        let entries = result.amortization_schedule.entries();
        let expected_len = payment_count(params.term_years, params.payment_frequency);

        prop_assert_eq!(entries.len(), expected_len as usize);
        prop_assert_eq!(entries[0].beginning_balance, params.principal);

        for (i, entry) in entries.iter().enumerate() {
            prop_assert_eq!(entry.payment_index as usize, i + 1);
            prop_assert_eq!(entry.scheduled_payment, result.installment_amount);
            prop_assert!(entry.interest_component + TOLERANCE >= Decimal::ZERO);
            prop_assert!(entry.principal_component + TOLERANCE >= Decimal::ZERO);
            prop_assert!(entry.ending_balance + TOLERANCE >= Decimal::ZERO);
        }
        for pair in entries.windows(2) {
            prop_assert_eq!(pair[1].beginning_balance, pair[0].ending_balance);
            prop_assert!(pair[1].payment_date > pair[0].payment_date);
        }
    }

    /// With a zero rate every installment is principal / n and no interest accrues.
    #[test]
    fn prop_zero_rate_has_no_interest(
        principal in principal(),
        term in term_years(),
        frequency in frequency(),
    ) {
        let params = LoanParams::new(principal, Decimal::ZERO, term, frequency);
        let result = calculate_loan(&params, anchor()).unwrap();
        prop_assert_eq!(result.amortization_schedule.total_interest(), Decimal::ZERO);
        let count = Decimal::from(payment_count(term, frequency));
        prop_assert_eq!(result.installment_amount, principal / count);
    }
}
