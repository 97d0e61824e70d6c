//! Admin client configuration from defaults and environment variables.
//!
//! Command-line flags are applied on top by the binary.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default rule store web interface address.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8081";

/// Configuration for the admin client.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminConfig {
    /// Base URL of the rule store API
    pub endpoint: String,

    /// Whole-request timeout
    pub request_timeout: Duration,

    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Log destination for the interactive panel
    pub log_file: Option<PathBuf>,

    /// Initial value of the form's action field
    pub default_action: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            log_level: "info".to_string(),
            log_file: None,
            default_action: "direct".to_string(),
        }
    }
}

impl AdminConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PROXY_ADMIN_ENDPOINT`: Rule store base URL (default: http://127.0.0.1:8081)
    /// - `PROXY_ADMIN_TIMEOUT_SECS`: Request timeout (default: 5)
    /// - `PROXY_ADMIN_CONNECT_TIMEOUT_SECS`: Connect timeout (default: 2)
    /// - `PROXY_ADMIN_LOG` or `RUST_LOG`: Log level (default: info)
    /// - `PROXY_ADMIN_LOG_FILE`: Log file for the interactive panel (default: none)
    /// - `PROXY_ADMIN_DEFAULT_ACTION`: Prefilled action (default: direct)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let secs = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|&s| s > 0)
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        Self {
            endpoint: lookup("PROXY_ADMIN_ENDPOINT").unwrap_or(defaults.endpoint),

            request_timeout: secs("PROXY_ADMIN_TIMEOUT_SECS", defaults.request_timeout),

            connect_timeout: secs("PROXY_ADMIN_CONNECT_TIMEOUT_SECS", defaults.connect_timeout),

            log_level: lookup("PROXY_ADMIN_LOG")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            log_file: lookup("PROXY_ADMIN_LOG_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),

            default_action: lookup("PROXY_ADMIN_DEFAULT_ACTION").unwrap_or(defaults.default_action),
        }
    }
}
