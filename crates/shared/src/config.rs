//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Exchange rate source configuration.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Default loan parameters offered to clients.
    #[serde(default)]
    pub loan: LoanDefaults,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Exchange rate source configuration.
///
/// The rate table itself is fetched by an external collaborator; the server only
/// knows where a previously fetched table was written to disk.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Path to a JSON rate table in the provider's wire format.
    #[serde(default)]
    pub table_path: Option<String>,
    /// Seed the built-in fallback table when no table could be loaded.
    #[serde(default)]
    pub use_fallback: bool,
    /// Base currency used when seeding the fallback table.
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            table_path: None,
            use_fallback: false,
            base_currency: default_base_currency(),
        }
    }
}

fn default_base_currency() -> String {
    "USD".to_string()
}

/// Default loan parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct LoanDefaults {
    /// Principal amount.
    #[serde(default = "default_principal")]
    pub principal: Decimal,
    /// Annual interest rate in percent.
    #[serde(default = "default_interest_rate")]
    pub interest_rate: Decimal,
    /// Loan term in years.
    #[serde(default = "default_term_years")]
    pub term_years: Decimal,
    /// Payment frequency name (`monthly`, `quarterly`, `semi-annually`, `annually`).
    #[serde(default = "default_payment_frequency")]
    pub payment_frequency: String,
}

impl Default for LoanDefaults {
    fn default() -> Self {
        Self {
            principal: default_principal(),
            interest_rate: default_interest_rate(),
            term_years: default_term_years(),
            payment_frequency: default_payment_frequency(),
        }
    }
}

fn default_principal() -> Decimal {
    Decimal::from(100_000)
}

fn default_interest_rate() -> Decimal {
    Decimal::from(5)
}

fn default_term_years() -> Decimal {
    Decimal::from(20)
}

fn default_payment_frequency() -> String {
    "monthly".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones: `config/default`,
    /// `config/{RUN_MODE}`, then `LOANFX__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LOANFX").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
