//! Property-based tests for rate derivation and conversion.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

use super::conversion::{convert, derived_rate};
use super::table::ExchangeRateTable;

const CODES: [&str; 5] = ["USD", "EUR", "JPY", "GBP", "IDR"];

/// Strategy to generate positive rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy to generate amounts (-1,000,000.00 to 1,000,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// USD-based table with the base quoted at 1 and the other codes random.
fn rate_table() -> impl Strategy<Value = ExchangeRateTable> {
    prop::collection::vec(positive_rate(), CODES.len() - 1).prop_map(|rates| {
        let mut map = BTreeMap::from([("USD".to_string(), Decimal::ONE)]);
        map.extend(CODES[1..].iter().map(|c| (*c).to_string()).zip(rates));
        ExchangeRateTable::new("USD", map, 0)
    })
}

fn code() -> impl Strategy<Value = &'static str> {
    prop::sample::select(CODES.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Converting a currency into itself is always rate 1.
    #[test]
    fn prop_identity_rate(table in rate_table(), code in code()) {
        prop_assert_eq!(derived_rate(&table, code, code), Decimal::ONE);
    }

    /// Going A to B then B to A lands back at 1, up to division rounding.
    #[test]
    fn prop_round_trip_rate(table in rate_table(), from in code(), to in code()) {
        let there = derived_rate(&table, from, to);
        let back = derived_rate(&table, to, from);
        let drift = (there * back - Decimal::ONE).abs();
        prop_assert!(drift < dec!(0.000000001), "{} -> {} drift {}", from, to, drift);
    }

    /// A cross rate matches the ratio of the two base rates.
    #[test]
    fn prop_cross_rate_through_base(table in rate_table(), from in code(), to in code()) {
        prop_assume!(from != to);
        let via_base = derived_rate(&table, "USD", to) / derived_rate(&table, "USD", from);
        let drift = (derived_rate(&table, from, to) - via_base).abs();
        prop_assert!(drift < dec!(0.000000001));
    }

    /// The converted amount is the source amount times the effective rate.
    #[test]
    fn prop_convert_applies_rate(
        table in rate_table(),
        amount in amount(),
        from in code(),
        to in code(),
    ) {
        let result = convert(amount, from, to, Some(&table));
        prop_assert_eq!(result.effective_rate, derived_rate(&table, from, to));
        prop_assert_eq!(result.converted_amount, amount * result.effective_rate);
    }

    /// Without a table every conversion is the identity.
    #[test]
    fn prop_convert_without_table(amount in amount(), from in code(), to in code()) {
        let result = convert(amount, from, to, None);
        prop_assert_eq!(result.effective_rate, Decimal::ONE);
        prop_assert_eq!(result.converted_amount, amount);
    }
}
