//! Admin panel operations against the in-memory rule store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use proxy_admin::api::{
    ApiError, InMemoryRuleStore, Method, ProxyConfig, RecordedRequest, Rule, RuleStore,
};
use proxy_admin::domain::{App, AppState, FormError, KeyInput, PanelCommand};
use proxy_admin::panel::{AdminPanel, PanelError};

fn sample_store() -> Arc<InMemoryRuleStore> {
    Arc::new(InMemoryRuleStore::with_rules(vec![
        Rule::new("*.com", "block"),
        Rule::new("*.net", "proxy").with_proxy("p1"),
    ]))
}

fn panel_for(store: &Arc<InMemoryRuleStore>) -> AdminPanel {
    AdminPanel::new(store.clone())
}

fn count(requests: &[RecordedRequest], method: Method, path: &str) -> usize {
    requests
        .iter()
        .filter(|r| r.method == method && r.path == path)
        .count()
}

#[tokio::test]
async fn test_load_rules_renders_one_row_per_rule() {
    let store = sample_store();
    let panel = panel_for(&store);
    let mut app = App::default();

    let rendered = assert_ok!(panel.load_rules(&mut app).await);

    assert_eq!(rendered, 2);
    assert_eq!(app.rule_rows.len(), 2);
    assert_eq!(app.rule_rows[0].label, "*.com → block");
    assert_eq!(app.rule_rows[1].label, "*.net → proxy (p1)");
    assert_eq!(app.rule_rows[1].pattern, "*.net");
}

#[tokio::test]
async fn test_load_config_replaces_text() {
    let store = sample_store();
    let panel = panel_for(&store);
    let mut app = App::default();
    app.config_text = Some("stale".to_string());

    assert_ok!(panel.load_config(&mut app).await);

    let text = app.config_text.expect("config rendered");
    assert!(text.starts_with("{\n  \"default_mode\": \"direct\","));
    assert!(text.contains("\"pattern\": \"*.net\""));
}

#[tokio::test]
async fn test_initialize_loads_each_view_once() {
    let store = sample_store();
    let panel = panel_for(&store);
    let mut app = App::default();

    assert_ok!(panel.initialize(&mut app).await);

    let requests = store.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(count(&requests, Method::Get, "/api/rules"), 1);
    assert_eq!(count(&requests, Method::Get, "/api/config"), 1);
    assert!(app.config_text.is_some());
}

#[tokio::test]
async fn test_add_with_empty_pattern_alerts_and_sends_nothing() {
    let store = sample_store();
    let panel = panel_for(&store);
    let mut app = App::default();
    app.form.action = "block".to_string();
    app.form.proxy = "p9".to_string();

    let err = assert_err!(panel.add_rule(&mut app).await);

    assert!(matches!(err, PanelError::Validation(FormError::EmptyPattern)));
    assert_eq!(app.state, AppState::Alert);
    assert_eq!(app.alert.as_deref(), Some("Pattern is required"));
    assert!(store.requests().await.is_empty());
    // Inputs are left for the user to fix
    assert_eq!(app.form.proxy, "p9");
}

#[tokio::test]
async fn test_add_without_proxy_omits_proxy_key() {
    let store = sample_store();
    let panel = panel_for(&store);
    let mut app = App::default();
    app.form.pattern = "x.com".to_string();
    app.form.action = "allow".to_string();
    app.form.proxy = String::new();

    assert_ok!(panel.add_rule(&mut app).await);

    let requests = store.requests().await;
    let post = &requests[0];
    assert_eq!(post.method, Method::Post);
    assert_eq!(post.path, "/api/rules");
    assert_eq!(post.body, Some(json!({"pattern": "x.com", "action": "allow"})));
    assert!(!post.body.as_ref().unwrap().as_object().unwrap().contains_key("proxy"));
}

#[tokio::test]
async fn test_add_with_proxy_includes_proxy_key() {
    let store = sample_store();
    let panel = panel_for(&store);
    let mut app = App::default();
    app.form.pattern = "x.com".to_string();
    app.form.action = "proxy".to_string();
    app.form.proxy = "p2".to_string();

    assert_ok!(panel.add_rule(&mut app).await);

    let requests = store.requests().await;
    assert_eq!(
        requests[0].body,
        Some(json!({"pattern": "x.com", "action": "proxy", "proxy": "p2"}))
    );
}

#[tokio::test]
async fn test_add_clears_inputs_and_refreshes_each_view_once() {
    let store = sample_store();
    let panel = panel_for(&store);
    let mut app = App::default();
    app.form.pattern = "x.com".to_string();
    app.form.action = "proxy".to_string();
    app.form.proxy = "p2".to_string();

    assert_ok!(panel.add_rule(&mut app).await);

    let requests = store.requests().await;
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(count(&requests, Method::Get, "/api/rules"), 1);
    assert_eq!(count(&requests, Method::Get, "/api/config"), 1);

    assert_eq!(app.form.pattern, "");
    assert_eq!(app.form.proxy, "");
    assert_eq!(app.form.action, "proxy");
    assert_eq!(app.rule_rows.len(), 3);
    assert_eq!(app.rule_rows[2].label, "x.com → proxy (p2)");
}

#[tokio::test]
async fn test_add_refreshes_even_when_store_rejects() {
    let store = sample_store();
    let panel = panel_for(&store);
    let mut app = App::default();
    app.form.pattern = "x.com".to_string();
    app.form.action = String::new();

    let err = assert_err!(panel.add_rule(&mut app).await);

    assert!(matches!(err, PanelError::Api(ApiError::Status { status: 400, .. })));
    let requests = store.requests().await;
    assert_eq!(count(&requests, Method::Get, "/api/rules"), 1);
    assert_eq!(count(&requests, Method::Get, "/api/config"), 1);
    assert_eq!(app.form.pattern, "");
    assert_eq!(app.rule_rows.len(), 2);
    assert!(app.error_message.as_deref().unwrap_or_default().contains("400"));
}

#[tokio::test]
async fn test_delete_percent_encodes_pattern_then_refreshes() {
    let store = sample_store();
    let panel = panel_for(&store);
    let mut app = App::default();

    assert_ok!(panel.delete_rule(&mut app, "*.com").await);

    let requests = store.requests().await;
    assert_eq!(requests[0].method, Method::Delete);
    assert_eq!(requests[0].path, "/api/rules/%2A.com");
    assert_eq!(requests.len(), 3);
    assert_eq!(count(&requests, Method::Get, "/api/rules"), 1);
    assert_eq!(count(&requests, Method::Get, "/api/config"), 1);

    assert_eq!(app.rule_rows.len(), 1);
    assert_eq!(app.rule_rows[0].label, "*.net → proxy (p1)");
}

#[tokio::test]
async fn test_delete_of_missing_rule_still_refreshes() {
    let store = sample_store();
    let panel = panel_for(&store);
    let mut app = App::default();

    let err = assert_err!(panel.delete_rule(&mut app, "gone.org").await);

    assert!(matches!(err, PanelError::Api(ApiError::Status { status: 404, .. })));
    assert_eq!(store.requests().await.len(), 3);
    assert_eq!(app.rule_rows.len(), 2);
}

#[tokio::test]
async fn test_keyboard_delete_flows_through_execute() {
    let store = sample_store();
    let panel = panel_for(&store);
    let mut app = App::default();
    assert_ok!(panel.initialize(&mut app).await);
    store.clear_requests().await;

    app.handle_key(KeyInput::Down);
    let command = app.handle_key(KeyInput::Char('d')).expect("delete command");
    assert_eq!(command, PanelCommand::DeleteRule("*.net".to_string()));

    assert_ok!(panel.execute(&mut app, command).await);

    assert_eq!(store.requests().await[0].path, "/api/rules/%2A.net");
    assert_eq!(store.rules().await, vec![Rule::new("*.com", "block")]);
    assert_eq!(app.selected_pattern(), Some("*.com"));
}

#[tokio::test]
async fn test_keyboard_add_flows_through_execute() {
    let store = Arc::new(InMemoryRuleStore::new());
    let panel = panel_for(&store);
    let mut app = App::new("block");

    app.handle_key(KeyInput::Tab);
    for c in "ads.example".chars() {
        app.handle_key(KeyInput::Char(c));
    }
    let command = app.handle_key(KeyInput::Enter).expect("add command");
    assert_ok!(panel.execute(&mut app, command).await);

    assert_eq!(store.rules().await, vec![Rule::new("ads.example", "block")]);
    assert_eq!(app.rule_rows[0].label, "ads.example → block");
}

/// Store whose endpoints all fail, counting calls.
#[derive(Default)]
struct UnreachableStore {
    calls: AtomicUsize,
}

impl UnreachableStore {
    fn fail(&self) -> ApiError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ApiError::Connection("Cannot connect to http://127.0.0.1:9".to_string())
    }
}

#[async_trait]
impl RuleStore for UnreachableStore {
    async fn list_rules(&self) -> Result<Vec<Rule>, ApiError> {
        Err(self.fail())
    }

    async fn current_config(&self) -> Result<ProxyConfig, ApiError> {
        Err(self.fail())
    }

    async fn create_rule(&self, _rule: &Rule) -> Result<(), ApiError> {
        Err(self.fail())
    }

    async fn delete_rule(&self, _pattern: &str) -> Result<(), ApiError> {
        Err(self.fail())
    }
}

#[tokio::test]
async fn test_failed_refresh_keeps_stale_view() {
    let store = Arc::new(UnreachableStore::default());
    let panel = AdminPanel::new(store.clone());
    let mut app = App::default();
    app.show_rules(&[Rule::new("*.com", "block")]);
    app.config_text = Some("{}".to_string());

    let err = assert_err!(panel.refresh(&mut app).await);

    assert!(matches!(err, PanelError::Api(ApiError::Connection(_))));
    // Both loads were attempted
    assert_eq!(store.calls.load(Ordering::SeqCst), 2);
    assert_eq!(app.rule_rows[0].label, "*.com → block");
    assert_eq!(app.config_text.as_deref(), Some("{}"));
    assert!(app.error_message.is_some());
}

#[tokio::test]
async fn test_failed_post_still_attempts_both_loads() {
    let store = Arc::new(UnreachableStore::default());
    let panel = AdminPanel::new(store.clone());
    let mut app = App::default();
    app.form.pattern = "x.com".to_string();

    let err = assert_err!(panel.add_rule(&mut app).await);

    assert!(matches!(err, PanelError::Api(ApiError::Connection(_))));
    assert_eq!(store.calls.load(Ordering::SeqCst), 3);
    assert_eq!(app.form.pattern, "");
    assert!(app.error_message.as_deref().unwrap_or_default().starts_with("Add rule:"));
}

/// Store whose rule list is down while the config endpoint still answers.
struct RulesDownStore;

#[async_trait]
impl RuleStore for RulesDownStore {
    async fn list_rules(&self) -> Result<Vec<Rule>, ApiError> {
        Err(ApiError::Status {
            status: 500,
            path: "/api/rules".to_string(),
        })
    }

    async fn current_config(&self) -> Result<ProxyConfig, ApiError> {
        Ok(ProxyConfig(json!({"default_mode": "direct"})))
    }

    async fn create_rule(&self, _rule: &Rule) -> Result<(), ApiError> {
        Ok(())
    }

    async fn delete_rule(&self, _pattern: &str) -> Result<(), ApiError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_rules_failure_not_hidden_by_config_success() {
    let panel = AdminPanel::new(Arc::new(RulesDownStore));
    let mut app = App::default();

    let err = assert_err!(panel.refresh(&mut app).await);

    assert!(matches!(err, PanelError::Api(ApiError::Status { status: 500, .. })));
    assert!(app.config_text.is_some());
    assert_eq!(
        app.error_message.as_deref(),
        Some("Rules: /api/rules returned HTTP 500")
    );
}
