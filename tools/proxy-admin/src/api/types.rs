//! Wire types for the rule store API (`/api/rules`, `/api/config`).

use serde::{Deserialize, Serialize};

/// Rule collection endpoint. `GET` lists, `POST` creates.
pub const RULES_PATH: &str = "/api/rules";

/// Active configuration endpoint.
pub const CONFIG_PATH: &str = "/api/config";

/// Path of a single rule, keyed by its percent-encoded pattern.
pub fn rule_path(pattern: &str) -> String {
    format!("{}/{}", RULES_PATH, urlencoding::encode(pattern))
}

/// A pattern-to-action mapping held by the rule store.
///
/// `action` is whatever the store accepts; the client never constrains it.
/// `proxy` is only present when the action needs a target and is left out
/// of the serialized body entirely when `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub pattern: String,
    #[serde(default)]
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
}

impl Rule {
    pub fn new(pattern: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            action: action.into(),
            proxy: None,
        }
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Proxy target, treating an empty string the same as no target.
    pub fn proxy_target(&self) -> Option<&str> {
        self.proxy.as_deref().filter(|p| !p.is_empty())
    }
}

/// The proxy engine's active configuration.
///
/// Opaque to the client: held as an order-preserving JSON value and only
/// ever rendered back as text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProxyConfig(pub serde_json::Value);

impl ProxyConfig {
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for ProxyConfig {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
