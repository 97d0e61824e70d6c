//! API module for communicating with the proxy rule store.
//!
//! `RuleStore` is the port the admin panel depends on. `RuleStoreClient`
//! implements it over HTTP/JSON, `InMemoryRuleStore` in-process.

mod client;
mod memory;
mod port;
mod types;

pub use client::{ApiError, RuleStoreClient};
pub use memory::{InMemoryRuleStore, Method, RecordedRequest};
pub use port::RuleStore;
pub use types::*;
