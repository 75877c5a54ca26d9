//! Application state shared across handlers.

use loanfx_core::amortization::{LoanParams, PaymentFrequency};
use loanfx_core::currency::ExchangeRateTable;
use loanfx_shared::config::LoanDefaults;
use loanfx_shared::{AppError, AppResult};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Application state shared across handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// Last rate table supplied by the rate provider, if any.
    pub rates: Arc<RwLock<Option<ExchangeRateTable>>>,
    /// Loan parameters used for fields a client leaves out.
    pub loan_defaults: LoanParams,
}

impl AppState {
    /// Creates state with no rate table loaded.
    #[must_use]
    pub fn new(loan_defaults: LoanParams) -> Self {
        Self {
            rates: Arc::default(),
            loan_defaults,
        }
    }

    /// Creates state with `table` already loaded.
    #[must_use]
    pub fn with_rates(loan_defaults: LoanParams, table: ExchangeRateTable) -> Self {
        Self {
            rates: Arc::new(RwLock::new(Some(table))),
            loan_defaults,
        }
    }

    /// Clone of the current table. The lock is released before returning.
    pub async fn rates_snapshot(&self) -> Option<ExchangeRateTable> {
        self.rates.read().await.clone()
    }

    /// Replaces the current table wholesale.
    pub async fn replace_rates(&self, table: ExchangeRateTable) {
        info!(
            base = %table.base_currency_code,
            currencies = table.len(),
            "Exchange rate table replaced"
        );
        *self.rates.write().await = Some(table);
    }
}

/// Turns configured loan defaults into engine parameters.
///
/// # Errors
///
/// Returns `AppError::Config` if the payment frequency is not recognised.
pub fn loan_defaults_from_config(defaults: &LoanDefaults) -> AppResult<LoanParams> {
    let frequency = defaults
        .payment_frequency
        .parse::<PaymentFrequency>()
        .map_err(AppError::Config)?;

    Ok(LoanParams::new(
        defaults.principal,
        defaults.interest_rate,
        defaults.term_years,
        frequency,
    ))
}
