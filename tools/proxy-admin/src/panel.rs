//! Admin panel operations.
//!
//! Each operation is a single request/render cycle against the rule store:
//! fetch, then replace what is on screen. Nothing fetched is kept beyond the
//! rendered view, and every mutation is followed by a refresh of both the
//! rule list and the config pane.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ApiError, RuleStore};
use crate::domain::{App, FormError, PanelCommand};

/// Failure of a panel operation.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error(transparent)]
    Validation(#[from] FormError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Drives the rule store on behalf of the view.
#[derive(Clone)]
pub struct AdminPanel {
    store: Arc<dyn RuleStore>,
}

impl AdminPanel {
    pub fn new(store: Arc<dyn RuleStore>) -> Self {
        Self { store }
    }

    /// Fetch the rule list and replace the rendered rows.
    ///
    /// On failure the previous rows stay on screen.
    pub async fn load_rules(&self, app: &mut App) -> Result<usize, PanelError> {
        match self.store.list_rules().await {
            Ok(rules) => {
                app.show_rules(&rules);
                debug!(rules = rules.len(), "rule list rendered");
                Ok(rules.len())
            }
            Err(e) => {
                warn!(error = %e, "failed to load rules");
                app.error_message = Some(format!("Rules: {}", e));
                Err(e.into())
            }
        }
    }

    /// Fetch the active configuration and replace the config pane.
    pub async fn load_config(&self, app: &mut App) -> Result<(), PanelError> {
        match self.store.current_config().await {
            Ok(config) => {
                app.show_config(&config);
                debug!("config rendered");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "failed to load config");
                app.error_message = Some(format!("Config: {}", e));
                Err(e.into())
            }
        }
    }

    /// Reload both views. Both loads always run; the first failure wins.
    pub async fn refresh(&self, app: &mut App) -> Result<(), PanelError> {
        app.error_message = None;
        let rules = self.load_rules(app).await;
        let config = self.load_config(app).await;
        rules?;
        config
    }

    /// Initial load when the panel comes up.
    pub async fn initialize(&self, app: &mut App) -> Result<(), PanelError> {
        info!("loading rules and config");
        self.refresh(app).await
    }

    /// Submit the form as a new rule.
    ///
    /// An empty pattern raises an alert and sends nothing. Otherwise the rule
    /// is posted, the pattern and proxy inputs are cleared, and both views
    /// are refreshed whatever the store answered.
    pub async fn add_rule(&self, app: &mut App) -> Result<(), PanelError> {
        let rule = match app.form.to_rule() {
            Ok(rule) => rule,
            Err(e) => {
                app.show_alert(e.to_string());
                return Err(e.into());
            }
        };

        let posted = self.store.create_rule(&rule).await;
        match &posted {
            Ok(()) => info!(pattern = %rule.pattern, action = %rule.action, "rule added"),
            Err(e) => warn!(pattern = %rule.pattern, error = %e, "add rule failed"),
        }

        app.form.clear_submitted();
        let refreshed = self.refresh(app).await;
        if let Err(e) = &posted {
            app.error_message = Some(format!("Add rule: {}", e));
        }
        posted?;
        refreshed
    }

    /// Delete the rule keyed by `pattern`, then refresh both views.
    pub async fn delete_rule(&self, app: &mut App, pattern: &str) -> Result<(), PanelError> {
        let deleted = self.store.delete_rule(pattern).await;
        match &deleted {
            Ok(()) => info!(pattern, "rule deleted"),
            Err(e) => warn!(pattern, error = %e, "delete rule failed"),
        }

        let refreshed = self.refresh(app).await;
        if let Err(e) = &deleted {
            app.error_message = Some(format!("Delete rule: {}", e));
        }
        deleted?;
        refreshed
    }

    /// Run a command produced by key handling.
    pub async fn execute(&self, app: &mut App, command: PanelCommand) -> Result<(), PanelError> {
        debug!(?command, "executing panel command");
        match command {
            PanelCommand::Refresh => self.refresh(app).await,
            PanelCommand::AddRule => self.add_rule(app).await,
            PanelCommand::DeleteRule(pattern) => self.delete_rule(app, &pattern).await,
        }
    }
}
