//! Messaging gateway (WAHA) configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::is_http_url;

/// Messaging gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Gateway base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value for the `X-Api-Key` header; omitted when unset
    pub api_key: Option<Secret<String>>,

    /// Gateway session name
    #[serde(default = "default_session")]
    pub session: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Messages fetched as conversation history
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidUrl("gateway.base_url"));
        }
        if self.session.trim().is_empty() {
            return Err(ValidationError::MissingRequired("gateway.session"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout("gateway.timeout_secs"));
        }
        if self.history_limit == 0 {
            return Err(ValidationError::InvalidHistoryLimit("gateway.history_limit"));
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            session: default_session(),
            timeout_secs: default_timeout(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_base_url() -> String {
    "http://waha:3000".to_string()
}

fn default_session() -> String {
    "default".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_history_limit() -> u32 {
    10
}
