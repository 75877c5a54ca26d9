//! Base-anchored exchange rate table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::RateTableError;

/// Exchange rates expressed relative to one base currency.
///
/// `conversion_rates[code]` is the amount of `code` bought by one unit of the base
/// currency. Field names on the wire follow the external rate provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRateTable {
    /// Currency every rate is quoted against.
    #[serde(rename = "base_code")]
    pub base_currency_code: String,
    /// Rates keyed by currency code.
    pub conversion_rates: BTreeMap<String, Decimal>,
    /// When the provider last refreshed the rates (Unix seconds).
    #[serde(rename = "time_last_update_unix", default)]
    pub last_update_timestamp: i64,
}

impl ExchangeRateTable {
    /// Creates a new rate table.
    #[must_use]
    pub fn new(
        base_currency_code: impl Into<String>,
        conversion_rates: BTreeMap<String, Decimal>,
        last_update_timestamp: i64,
    ) -> Self {
        Self {
            base_currency_code: base_currency_code.into(),
            conversion_rates,
            last_update_timestamp,
        }
    }

    /// Rate quoted for `code`, if present.
    #[must_use]
    pub fn rate(&self, code: &str) -> Option<Decimal> {
        self.conversion_rates.get(code).copied()
    }

    /// Returns true if `code` is the base or has a quoted rate.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        code == self.base_currency_code || self.conversion_rates.contains_key(code)
    }

    /// Number of quoted rates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.conversion_rates.len()
    }

    /// Returns true if no rates are quoted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conversion_rates.is_empty()
    }

    /// Checks that the table names a base and quotes only positive rates.
    pub fn validate(&self) -> Result<(), RateTableError> {
        if self.base_currency_code.trim().is_empty() {
            return Err(RateTableError::EmptyBaseCode);
        }
        if let Some((code, rate)) = self
            .conversion_rates
            .iter()
            .find(|(_, rate)| **rate <= Decimal::ZERO)
        {
            return Err(RateTableError::NonPositiveRate {
                code: code.clone(),
                rate: *rate,
            });
        }
        Ok(())
    }
}
