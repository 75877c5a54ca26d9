//! Searchable listing of the rates in a table.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog;
use super::table::ExchangeRateTable;

/// One row of a rate listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateListing {
    /// Currency code.
    pub code: String,
    /// Display name, or the code when the catalog does not know it.
    pub name: String,
    /// Units of this currency per unit of the table's base.
    pub rate: Decimal,
}

/// Lists the table's rates ordered by code, keeping rows whose code or name
/// contains `search` (case-insensitive). A blank search keeps everything.
#[must_use]
pub fn list_rates(table: &ExchangeRateTable, search: Option<&str>) -> Vec<RateListing> {
    let needle = search.map(str::trim).unwrap_or_default().to_lowercase();

    // BTreeMap iteration is already ordered by code.
    table
        .conversion_rates
        .iter()
        .map(|(code, rate)| RateListing {
            code: code.clone(),
            name: catalog::lookup(code).map_or_else(|| code.clone(), |info| info.name),
            rate: *rate,
        })
        .filter(|row| {
            needle.is_empty()
                || row.code.to_lowercase().contains(&needle)
                || row.name.to_lowercase().contains(&needle)
        })
        .collect()
}
