//! Display formatting for money, percentages and dates.
//!
//! All rounding uses Banker's Rounding (`MidpointNearestEven`).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use crate::currency::catalog;

/// Decimal places shown for money and percentages.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Round a value to `decimal_places` using Banker's Rounding.
///
/// ```
/// use loanfx_core::format::round_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_money(dec!(2.125), 2), dec!(2.12));
/// assert_eq!(round_money(dec!(2.135), 2), dec!(2.14));
/// ```
#[must_use]
pub fn round_money(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

/// Fixed two-decimal text of `value` (sign dropped).
fn fixed(value: Decimal) -> String {
    let mut rounded = round_money(value.abs(), DISPLAY_DECIMALS);
    rounded.rescale(DISPLAY_DECIMALS);
    rounded.to_string()
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn is_negative(value: Decimal) -> bool {
    let rounded = round_money(value, DISPLAY_DECIMALS);
    rounded.is_sign_negative() && !rounded.is_zero()
}

/// Format an amount for display in `currency_code`.
///
/// Known codes get their symbol as a prefix (`$1,234.56`), others get the
/// code and a space (`CHF 1,234.56`). Negatives put the sign first (`-$1.00`).
#[must_use]
pub fn format_currency(amount: Decimal, currency_code: &str) -> String {
    let text = fixed(amount);
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let number = format!("{}.{cents}", group_thousands(whole));
    let sign = if is_negative(amount) { "-" } else { "" };

    match catalog::symbol(currency_code) {
        Some(symbol) => format!("{sign}{symbol}{number}"),
        None => format!("{sign}{} {number}", currency_code.to_ascii_uppercase()),
    }
}

/// Format a value that is already a percentage (`5` becomes `"5.00%"`).
#[must_use]
pub fn format_percentage(value: Decimal) -> String {
    let sign = if is_negative(value) { "-" } else { "" };
    format!("{sign}{}%", fixed(value))
}

/// Format a date as `"Jan 5, 2026"`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
