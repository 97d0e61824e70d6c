//! Rule store port.
//!
//! The four operations the admin panel needs from the external rule store.
//! `RuleStoreClient` talks to it over HTTP; `InMemoryRuleStore` stands in
//! for it in demo mode and tests.

use async_trait::async_trait;

use super::client::ApiError;
use super::types::{ProxyConfig, Rule};

/// Rule store (Driven Port)
#[async_trait]
pub trait RuleStore: Send + Sync {
    /// `GET /api/rules`, in server order.
    async fn list_rules(&self) -> Result<Vec<Rule>, ApiError>;

    /// `GET /api/config`.
    async fn current_config(&self) -> Result<ProxyConfig, ApiError>;

    /// `POST /api/rules`. The response body is ignored.
    async fn create_rule(&self, rule: &Rule) -> Result<(), ApiError>;

    /// `DELETE /api/rules/{pattern}`. The response body is ignored.
    async fn delete_rule(&self, pattern: &str) -> Result<(), ApiError>;
}
