//! Pure rendering from fetched data to display text.

use crate::api::{ProxyConfig, Rule};

/// One rendered line of the rule list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRow {
    /// Key for the row's delete control.
    pub pattern: String,
    /// `pattern → action (proxy)`.
    pub label: String,
}

/// Format a rule as `pattern → action`, with ` (proxy)` when it has a target.
pub fn rule_label(rule: &Rule) -> String {
    match rule.proxy_target() {
        Some(proxy) => format!("{} → {} ({})", rule.pattern, rule.action, proxy),
        None => format!("{} → {}", rule.pattern, rule.action),
    }
}

/// Render the rule list, one row per rule, in the order given.
pub fn rule_rows(rules: &[Rule]) -> Vec<RuleRow> {
    rules
        .iter()
        .map(|rule| RuleRow {
            pattern: rule.pattern.clone(),
            label: rule_label(rule),
        })
        .collect()
}

/// Pretty-print the configuration with two-space indentation.
pub fn config_text(config: &ProxyConfig) -> String {
    serde_json::to_string_pretty(config.as_value()).unwrap_or_else(|_| config.as_value().to_string())
}
