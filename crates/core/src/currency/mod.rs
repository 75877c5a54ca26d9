//! Exchange rate tables and currency conversion.
//!
//! A table quotes every currency against one base. Rates between any two
//! codes are derived through that base.

pub mod catalog;
pub mod conversion;
pub mod error;
pub mod listing;
pub mod table;

#[cfg(test)]
mod props;

pub use catalog::{fallback_rates, known_currencies};
pub use conversion::{ConversionResult, convert, derived_rate};
pub use error::RateTableError;
pub use listing::{RateListing, list_rates};
pub use table::ExchangeRateTable;
