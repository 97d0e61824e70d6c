//! Proxy Admin: administrative client for the rule-based proxy.
//!
//! Shows the rule store's rules and the proxy's active configuration, and
//! adds or deletes rules through the rule store's HTTP API. The proxy engine
//! itself is an external collaborator reached only through that API.
//!
//! ## Architecture
//!
//! ```text
//!   key input ──► App::handle_key ──► PanelCommand
//!                                         │
//!                                         ▼
//!                    AdminPanel ──► RuleStore (HTTP / in-memory)
//!                        │
//!                        ▼
//!          App (rendered rows + config text) ──► ui::render
//! ```
//!
//! Nothing fetched is cached: every mutation is followed by a fresh load of
//! both the rule list and the configuration.

pub mod api;
pub mod config;
pub mod domain;
pub mod logging;
pub mod panel;
pub mod ui;

pub use api::{ApiError, InMemoryRuleStore, ProxyConfig, Rule, RuleStore, RuleStoreClient};
pub use config::AdminConfig;
pub use domain::{App, AppState, KeyInput, PanelCommand, RuleRow};
pub use panel::{AdminPanel, PanelError};
