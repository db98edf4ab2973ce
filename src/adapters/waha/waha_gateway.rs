//! WAHA Gateway - Implementation of MessagingGateway over the WAHA REST API.
//!
//! Endpoints used:
//! - `POST /api/sendText` `{session, chatId, text}`
//! - `GET /api/{session}/chats/{chatId}/messages?limit=N&downloadMedia=false`
//! - `POST /api/startTyping` / `POST /api/stopTyping` `{session, chatId}`
//!
//! Every request carries the `X-Api-Key` header when a key is configured and
//! is bounded by the client timeout. Failures are logged here and returned;
//! nothing is retried.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::domain::foundation::ChatId;
use crate::ports::{GatewayError, HistoryMessage, MessagingGateway};

const API_KEY_HEADER: &str = "X-Api-Key";

/// Configuration for the WAHA gateway client.
#[derive(Debug, Clone)]
pub struct WahaConfig {
    /// Gateway base URL (e.g., "http://waha:3000").
    pub base_url: String,
    api_key: Option<Secret<String>>,
    /// WAHA session name.
    pub session: String,
    pub timeout: Duration,
}

impl WahaConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            session: "default".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.is_empty()).map(Secret::new);
        self
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = session.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// WAHA REST client.
pub struct WahaGateway {
    config: WahaConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendTextBody<'a> {
    session: &'a str,
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TypingBody<'a> {
    session: &'a str,
    chat_id: &'a str,
}

impl WahaGateway {
    pub fn new(config: WahaConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn history_url(&self, chat_id: &ChatId) -> String {
        self.url(&format!(
            "/api/{}/chats/{}/messages",
            self.config.session,
            chat_id.as_str()
        ))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key.expose_secret()),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> Result<Response, GatewayError> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::status(status.as_u16(), body))
    }

    async fn post_typing(&self, path: &str, chat_id: &ChatId) -> Result<(), GatewayError> {
        let body = TypingBody {
            session: &self.config.session,
            chat_id: chat_id.as_str(),
        };
        self.execute(self.client.post(self.url(path)).json(&body))
            .await
            .map(|_| ())
    }

    fn transport_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else {
            GatewayError::network(e.to_string())
        }
    }
}

#[async_trait]
impl MessagingGateway for WahaGateway {
    async fn send_message(&self, chat_id: &ChatId, text: &str) -> Result<(), GatewayError> {
        let body = SendTextBody {
            session: &self.config.session,
            chat_id: chat_id.as_str(),
            text,
        };

        let result = self
            .execute(self.client.post(self.url("/api/sendText")).json(&body))
            .await
            .map(|_| ());

        if let Err(ref e) = result {
            tracing::error!(chat_id = %chat_id, error = %e, "WAHA sendText failed");
        }
        result
    }

    async fn get_history_messages(
        &self,
        chat_id: &ChatId,
        limit: u32,
    ) -> Result<Vec<HistoryMessage>, GatewayError> {
        let request = self.client.get(self.history_url(chat_id)).query(&[
            ("limit", limit.to_string()),
            ("downloadMedia", "false".to_string()),
        ]);

        let result = match self.execute(request).await {
            Ok(response) => response
                .json::<Vec<HistoryMessage>>()
                .await
                .map_err(|e| GatewayError::decode(e.to_string())),
            Err(e) => Err(e),
        };

        if let Err(ref e) = result {
            tracing::error!(chat_id = %chat_id, error = %e, "WAHA history fetch failed");
        }
        result
    }

    async fn start_typing(&self, chat_id: &ChatId) -> Result<(), GatewayError> {
        let result = self.post_typing("/api/startTyping", chat_id).await;
        if let Err(ref e) = result {
            tracing::warn!(chat_id = %chat_id, error = %e, "WAHA startTyping failed");
        }
        result
    }

    async fn stop_typing(&self, chat_id: &ChatId) -> Result<(), GatewayError> {
        let result = self.post_typing("/api/stopTyping", chat_id).await;
        if let Err(ref e) = result {
            tracing::warn!(chat_id = %chat_id, error = %e, "WAHA stopTyping failed");
        }
        result
    }
}
