//! Currency conversion over a base-anchored rate table.
//!
//! Conversion never fails. Two lenient policies keep display code rendering even
//! when upstream data is incomplete:
//! - a code missing from the table (or quoted at zero) is treated as rate 1
//! - no table at all gives an identity conversion

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::table::ExchangeRateTable;

/// Outcome of converting one amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    /// Amount before conversion.
    pub source_amount: Decimal,
    /// Currency of `source_amount`.
    pub source_currency_code: String,
    /// Currency of `converted_amount`.
    pub target_currency_code: String,
    /// Units of target currency per unit of source currency.
    pub effective_rate: Decimal,
    /// `source_amount * effective_rate`.
    pub converted_amount: Decimal,
}

fn rate_or_one(table: &ExchangeRateTable, code: &str) -> Decimal {
    match table.rate(code) {
        Some(rate) if !rate.is_zero() => rate,
        _ => {
            debug!(
                currency = code,
                base = %table.base_currency_code,
                "No usable rate in table, assuming 1"
            );
            Decimal::ONE
        }
    }
}

fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or_else(|| {
        warn!(%numerator, %denominator, "Derived rate out of range, saturating");
        Decimal::MAX
    })
}

/// Rate converting `from` into `to`, derived through the table's base currency.
///
/// ```
/// use std::collections::BTreeMap;
/// use loanfx_core::currency::{ExchangeRateTable, derived_rate};
/// use rust_decimal_macros::dec;
///
/// let table = ExchangeRateTable::new(
///     "USD",
///     BTreeMap::from([("EUR".to_string(), dec!(0.8))]),
///     0,
/// );
/// assert_eq!(derived_rate(&table, "USD", "EUR"), dec!(0.8));
/// assert_eq!(derived_rate(&table, "EUR", "USD"), dec!(1.25));
/// ```
#[must_use]
pub fn derived_rate(table: &ExchangeRateTable, from: &str, to: &str) -> Decimal {
    if from == table.base_currency_code {
        rate_or_one(table, to)
    } else if to == table.base_currency_code {
        ratio(Decimal::ONE, rate_or_one(table, from))
    } else {
        ratio(rate_or_one(table, to), rate_or_one(table, from))
    }
}

/// Converts `amount` from one currency to another.
///
/// Without a table the amount is returned unchanged at rate 1.
#[must_use]
pub fn convert(
    amount: Decimal,
    from: &str,
    to: &str,
    table: Option<&ExchangeRateTable>,
) -> ConversionResult {
    let effective_rate = table.map_or(Decimal::ONE, |table| derived_rate(table, from, to));

    ConversionResult {
        source_amount: amount,
        source_currency_code: from.to_string(),
        target_currency_code: to.to_string(),
        effective_rate,
        converted_amount: amount.saturating_mul(effective_rate),
    }
}
