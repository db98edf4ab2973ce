//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SALES_RELAY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use sales_relay::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Listening on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod gateway;
mod knowledge;
mod routing;
mod server;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use knowledge::KnowledgeConfig;
pub use routing::RoutingConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults so that a missing value surfaces as a precise
/// [`ValidationError`] from [`AppConfig::validate()`] instead of a generic
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Messaging gateway configuration (WAHA)
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Chat model configuration (OpenAI-compatible)
    #[serde(default)]
    pub ai: AiConfig,

    /// Knowledge base directory and retrieval settings
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Support numbers, alert channel and control tags
    #[serde(default)]
    pub routing: RoutingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SALES_RELAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `SALES_RELAY__SERVER__PORT=5050` -> `server.port = 5050`
    /// - `SALES_RELAY__ROUTING__SUPPORT_NUMBERS=215470020018431,556282027373`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SALES_RELAY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found, section by section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.gateway.validate()?;
        self.ai.validate()?;
        self.knowledge.validate()?;
        self.routing.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

/// True for `http://` or `https://` URLs with a non-empty host part.
pub(crate) fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(rest) => rest.split('/').next().is_some_and(|host| !host.is_empty()),
        None => false,
    }
}
