//! LoanFX API Server
//!
//! Main entry point for the loan and currency conversion service.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use loanfx_api::state::loan_defaults_from_config;
use loanfx_api::{AppState, create_router};
use loanfx_core::currency::{ExchangeRateTable, fallback_rates};
use loanfx_shared::AppConfig;
use loanfx_shared::config::RatesConfig;

/// Layered configuration; a bad source aborts startup with context.
fn load_config() -> anyhow::Result<AppConfig> {
    AppConfig::load().context("Failed to load configuration")
}

/// Reads and validates a rate table written by the rate provider.
fn read_rate_table(path: &Path) -> anyhow::Result<ExchangeRateTable> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rate table {}", path.display()))?;
    let table: ExchangeRateTable = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse rate table {}", path.display()))?;
    table.validate()?;
    Ok(table)
}

/// Initial rate table: the configured file, else the built-in fallback if enabled.
fn initial_rate_table(rates: &RatesConfig) -> Option<ExchangeRateTable> {
    if let Some(path) = &rates.table_path {
        match read_rate_table(Path::new(path)) {
            Ok(table) => {
                info!(
                    path = %path,
                    base = %table.base_currency_code,
                    currencies = table.len(),
                    "Loaded exchange rate table"
                );
                return Some(table);
            }
            Err(e) => {
                let reason = format!("{e:#}");
                warn!(error = %reason, "Could not load exchange rate table");
            }
        }
    }

    if rates.use_fallback {
        let table = fallback_rates(&rates.base_currency, Utc::now().timestamp());
        info!(base = %table.base_currency_code, "Using built-in fallback exchange rates");
        return Some(table);
    }

    info!("No exchange rate table loaded, conversions are identity until one is supplied");
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loanfx=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = load_config()?;

    let loan_defaults = loan_defaults_from_config(&config.loan)?;
    info!(
        principal = %loan_defaults.principal,
        rate = %loan_defaults.annual_interest_rate,
        term_years = %loan_defaults.term_years,
        frequency = %loan_defaults.payment_frequency,
        "Loan defaults configured"
    );

    // Create application state
    let state = match initial_rate_table(&config.rates) {
        Some(table) => AppState::with_rates(loan_defaults, table),
        None => AppState::new(loan_defaults),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
