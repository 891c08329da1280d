//! Environment-driven configuration.
//!
//! Every setting is read from `SKILLZUP__<SECTION>__<KEY>` variables, with an
//! optional `.env` file for local runs. Sections without required keys fall
//! back to their `Default`.
//!
//! ```no_run
//! use skillzup::config::AppConfig;
//!
//! let config = AppConfig::load().expect("configuration");
//! config.validate().expect("valid configuration");
//! println!("listening on {}", config.server.port);
//! ```

mod ai;
mod auth;
mod chat;
mod database;
mod error;
mod payment;
mod search;
mod server;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use chat::ChatConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use payment::PaymentConfig;
pub use search::SearchConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// All configuration sections. `database`, `auth` and `payment` are required.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Listener, limits and environment
    #[serde(default)]
    pub server: ServerConfig,

    /// PostgreSQL pool
    pub database: DatabaseConfig,

    /// Session tokens and cookie
    pub auth: AuthConfig,

    /// Razorpay credentials and currency
    pub payment: PaymentConfig,

    /// Gemini model access
    #[serde(default)]
    pub ai: AiConfig,

    /// Resource search API keys
    #[serde(default)]
    pub search: SearchConfig,

    /// Chat expiry and context window
    #[serde(default)]
    pub chat: ChatConfig,
}

impl AppConfig {
    /// Reads `.env` (if present) and the process environment.
    ///
    /// `SKILLZUP__PAYMENT__RAZORPAY_KEY_ID=rzp_x` sets `payment.razorpay_key_id`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SKILLZUP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks every section, stopping at the first problem.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.payment.validate()?;
        self.ai.validate()?;
        self.search.validate()?;
        self.chat.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
