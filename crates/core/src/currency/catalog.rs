//! Built-in currency metadata and fallback rates.
//!
//! Used when the external metadata or rate provider is unreachable, so that
//! currency pickers and conversions still have something to show.

use loanfx_shared::types::CurrencyInfo;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use super::conversion::derived_rate;
use super::table::ExchangeRateTable;

/// (code, name, symbol, units per US dollar as mantissa and scale)
const CURRENCIES: &[(&str, &str, Option<&str>, i64, u32)] = &[
    ("AED", "UAE Dirham", None, 36725, 4),
    ("AUD", "Australian Dollar", Some("A$"), 152, 2),
    ("BRL", "Brazilian Real", Some("R$"), 505, 2),
    ("CAD", "Canadian Dollar", Some("CA$"), 136, 2),
    ("CHF", "Swiss Franc", None, 90, 2),
    ("CNY", "Chinese Yuan", Some("CN¥"), 724, 2),
    ("EUR", "Euro", Some("€"), 92, 2),
    ("GBP", "British Pound", Some("£"), 79, 2),
    ("HKD", "Hong Kong Dollar", Some("HK$"), 782, 2),
    ("IDR", "Indonesian Rupiah", Some("Rp"), 15900, 0),
    ("INR", "Indian Rupee", Some("₹"), 833, 1),
    ("JPY", "Japanese Yen", Some("¥"), 1515, 1),
    ("KRW", "South Korean Won", Some("₩"), 1350, 0),
    ("MXN", "Mexican Peso", Some("MX$"), 171, 1),
    ("NZD", "New Zealand Dollar", Some("NZ$"), 166, 2),
    ("SEK", "Swedish Krona", None, 106, 1),
    ("SGD", "Singapore Dollar", Some("S$"), 135, 2),
    ("USD", "US Dollar", Some("$"), 1, 0),
    ("ZAR", "South African Rand", None, 186, 1),
];

/// Code of the currency the fallback rates are quoted against.
pub const FALLBACK_BASE: &str = "USD";

/// All currencies known to the catalog, ordered by code.
#[must_use]
pub fn known_currencies() -> Vec<CurrencyInfo> {
    CURRENCIES
        .iter()
        .map(|(code, name, symbol, ..)| CurrencyInfo::new(code, name, *symbol))
        .collect()
}

/// Metadata for `code`, if the catalog knows it.
#[must_use]
pub fn lookup(code: &str) -> Option<CurrencyInfo> {
    CURRENCIES
        .iter()
        .find(|(c, ..)| c.eq_ignore_ascii_case(code))
        .map(|(code, name, symbol, ..)| CurrencyInfo::new(code, name, *symbol))
}

/// Display symbol for `code`, if one is commonly used.
#[must_use]
pub fn symbol(code: &str) -> Option<&'static str> {
    CURRENCIES
        .iter()
        .find(|(c, ..)| c.eq_ignore_ascii_case(code))
        .and_then(|(_, _, symbol, ..)| *symbol)
}

fn usd_table(timestamp: i64) -> ExchangeRateTable {
    let rates = CURRENCIES
        .iter()
        .map(|(code, _, _, units, scale)| ((*code).to_string(), Decimal::new(*units, *scale)))
        .collect::<BTreeMap<_, _>>();
    ExchangeRateTable::new(FALLBACK_BASE, rates, timestamp)
}

/// Static approximate rates re-anchored to `base`.
///
/// An unknown `base` yields the USD-anchored table unchanged.
#[must_use]
pub fn fallback_rates(base: &str, timestamp: i64) -> ExchangeRateTable {
    let usd = usd_table(timestamp);
    if base == FALLBACK_BASE || !usd.contains(base) {
        return usd;
    }

    let rates = usd
        .conversion_rates
        .keys()
        .map(|code| (code.clone(), derived_rate(&usd, base, code)))
        .collect();
    ExchangeRateTable::new(base, rates, timestamp)
}
