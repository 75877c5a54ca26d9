//! Currency identifiers and metadata.
//!
//! Rate tables arrive from an external provider and can mention any ISO 4217
//! code, so codes are validated strings rather than a closed enum.

use serde::{Deserialize, Serialize};

/// A three-letter ISO 4217 currency code, always uppercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(Self(trimmed.to_ascii_uppercase()))
        } else {
            Err(format!("Unknown currency: {s}"))
        }
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Display metadata for a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    /// ISO 4217 code.
    pub code: String,
    /// Human-readable name (e.g., "US Dollar").
    pub name: String,
    /// Display symbol, when one is commonly used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl CurrencyInfo {
    /// Creates a new currency description.
    #[must_use]
    pub fn new(code: &str, name: &str, symbol: Option<&str>) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            symbol: symbol.map(str::to_string),
        }
    }
}

#[cfg(test)]
#[path = "currency_tests.rs"]
mod tests;
