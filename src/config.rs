//! Environment configuration
//!
//! All runtime configuration comes from the environment (a `.env` file is
//! honored). A missing credential is the one unrecoverable startup failure.

use std::env;

use thiserror::Error;

/// Default port for the HTTP surface
const DEFAULT_PORT: u16 = 8080;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty
    #[error("Required environment variable {0} is not set")]
    MissingVar(&'static str),
}

/// Runtime configuration for the bot service
#[derive(Debug, Clone)]
pub struct Config {
    /// Static bootstrap token the platform must present on the webhook
    pub bot_token: String,
    /// URL of the fact endpoint the get command proxies
    pub fact_url: String,
    /// Port the HTTP surface listens on
    pub port: u16,
}

impl Config {
    /// Load configuration from the environment
    ///
    /// `BOT_TOKEN` and `FACT_URL` are required; `PORT` defaults to 8080.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let bot_token = require_var("BOT_TOKEN")?;
        let fact_url = require_var("FACT_URL")?;
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            bot_token,
            fact_url,
            port,
        })
    }
}

/// Read a required variable, treating blank values as missing
fn require_var(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::MissingVar(name))
}
