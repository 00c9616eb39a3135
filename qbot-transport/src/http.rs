//! Reqwest-backed [`Transport`]: posts JSON to `{base_url}/{method}`.

use async_trait::async_trait;
use qbot_core::{QbotError, Result};
use reqwest::Client;
use tracing::debug;

use crate::{ApiConfig, RawResponse, Transport};

/// Production transport over a shared reqwest client.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url(),
        }
    }

    /// Uses an existing reqwest client (e.g. with custom timeouts or proxy).
    pub fn with_client(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, method: &str, params: &serde_json::Value) -> Result<RawResponse> {
        let url = format!("{}/{}", self.base_url, method);
        let response = self
            .client
            .post(&url)
            .json(params)
            .send()
            .await
            .map_err(|e| QbotError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| QbotError::Transport(e.to_string()))?;
        debug!(method = method, status = status, "api response received");
        Ok(RawResponse { status, body })
    }
}
