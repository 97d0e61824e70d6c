//! HTTP client for the proxy rule store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use super::port::RuleStore;
use super::types::*;

/// Errors that can occur when communicating with the rule store.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("{path} returned HTTP {status}")]
    Status { status: u16, path: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Rule store API client.
pub struct RuleStoreClient {
    client: Client,
    base_url: String,
}

impl RuleStoreClient {
    /// Create a new client with the default timeouts (5s request, 2s connect).
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeouts(base_url, Duration::from_secs(5), Duration::from_secs(2))
    }

    /// Create a new client with explicit timeouts.
    pub fn with_timeouts(
        base_url: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ApiError::InvalidEndpoint(format!("{}: {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map transport failures, distinguishing refused connections.
    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_connect() {
            ApiError::Connection(format!("Cannot connect to {}", self.base_url))
        } else {
            ApiError::Http(e)
        }
    }

    fn check_status(response: Response, path: &str) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            })
        }
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        debug!(method = "GET", path, "rule store request");

        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        Self::check_status(response, path)?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl RuleStore for RuleStoreClient {
    async fn list_rules(&self) -> Result<Vec<Rule>, ApiError> {
        self.get_json(RULES_PATH).await
    }

    async fn current_config(&self) -> Result<ProxyConfig, ApiError> {
        self.get_json(CONFIG_PATH).await
    }

    async fn create_rule(&self, rule: &Rule) -> Result<(), ApiError> {
        debug!(method = "POST", path = RULES_PATH, pattern = %rule.pattern, "rule store request");

        let response = self
            .client
            .post(self.url(RULES_PATH))
            .json(rule)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        Self::check_status(response, RULES_PATH).map(|_| ())
    }

    async fn delete_rule(&self, pattern: &str) -> Result<(), ApiError> {
        let path = rule_path(pattern);
        debug!(method = "DELETE", path = %path, "rule store request");

        let response = self
            .client
            .delete(self.url(&path))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        Self::check_status(response, &path).map(|_| ())
    }
}
