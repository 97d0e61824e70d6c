//! In-process rule store.
//!
//! Backs `--demo` mode and the test suite. Behaves like the proxy's web
//! interface: rules are unique by pattern, `POST` without a pattern or
//! action is rejected with 400, deleting an unknown pattern is a 404, and
//! the config view embeds the current rule list under `"rules"`.
//!
//! Every call is recorded so callers can inspect which requests were made.

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use super::client::ApiError;
use super::port::RuleStore;
use super::types::*;

/// HTTP method of a recorded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// A request as it would have gone over the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl RecordedRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }
}

struct StoreState {
    settings: serde_json::Map<String, Value>,
    rules: Vec<Rule>,
    requests: Vec<RecordedRequest>,
}

/// Rule store held entirely in memory.
pub struct InMemoryRuleStore {
    state: Mutex<StoreState>,
}

impl Default for InMemoryRuleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRuleStore {
    /// Empty store with the proxy's default settings.
    pub fn new() -> Self {
        Self::with_rules(Vec::new())
    }

    pub fn with_rules(rules: Vec<Rule>) -> Self {
        let settings = match default_settings() {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };

        Self {
            state: Mutex::new(StoreState {
                settings,
                rules,
                requests: Vec::new(),
            }),
        }
    }

    /// Store seeded with a handful of rules for demo mode.
    pub fn demo() -> Self {
        Self::with_rules(vec![
            Rule::new("^192\\.168\\.", "direct"),
            Rule::new("^10\\.", "direct"),
            Rule::new(".*\\.internal\\.example\\.com", "proxy").with_proxy("default_proxy"),
            Rule::new(".*\\.ads\\.example\\.net", "block"),
        ])
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().await.requests.clone()
    }

    pub async fn clear_requests(&self) {
        self.state.lock().await.requests.clear();
    }

    /// Snapshot of the stored rules.
    pub async fn rules(&self) -> Vec<Rule> {
        self.state.lock().await.rules.clone()
    }
}

fn default_settings() -> Value {
    json!({
        "default_mode": "direct",
        "proxy_settings": {
            "default_proxy": {
                "host": "localhost",
                "port": 8080,
                "type": "http"
            }
        },
        "rules": []
    })
}

#[async_trait]
impl RuleStore for InMemoryRuleStore {
    async fn list_rules(&self) -> Result<Vec<Rule>, ApiError> {
        let mut state = self.state.lock().await;
        state.requests.push(RecordedRequest::new(Method::Get, RULES_PATH));
        Ok(state.rules.clone())
    }

    async fn current_config(&self) -> Result<ProxyConfig, ApiError> {
        let mut state = self.state.lock().await;
        state.requests.push(RecordedRequest::new(Method::Get, CONFIG_PATH));

        let rules = serde_json::to_value(&state.rules).map_err(|e| ApiError::Parse(e.to_string()))?;
        let mut config = state.settings.clone();
        config.insert("rules".to_string(), rules);
        Ok(ProxyConfig(Value::Object(config)))
    }

    async fn create_rule(&self, rule: &Rule) -> Result<(), ApiError> {
        let body = serde_json::to_value(rule).map_err(|e| ApiError::Parse(e.to_string()))?;

        let mut state = self.state.lock().await;
        state.requests.push(RecordedRequest {
            method: Method::Post,
            path: RULES_PATH.to_string(),
            body: Some(body),
        });

        if rule.pattern.is_empty() || rule.action.is_empty() {
            return Err(ApiError::Status {
                status: 400,
                path: RULES_PATH.to_string(),
            });
        }

        match state.rules.iter_mut().find(|r| r.pattern == rule.pattern) {
            Some(existing) => *existing = rule.clone(),
            None => state.rules.push(rule.clone()),
        }
        Ok(())
    }

    async fn delete_rule(&self, pattern: &str) -> Result<(), ApiError> {
        let path = rule_path(pattern);

        let mut state = self.state.lock().await;
        state.requests.push(RecordedRequest::new(Method::Delete, path.clone()));

        let before = state.rules.len();
        state.rules.retain(|r| r.pattern != pattern);
        if state.rules.len() == before {
            return Err(ApiError::Status { status: 404, path });
        }
        Ok(())
    }
}
