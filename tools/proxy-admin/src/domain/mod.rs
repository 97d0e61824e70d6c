//! Domain models for the admin panel.

mod app;
mod form;
mod view;

pub use app::{App, AppState, Focus, KeyInput, PanelCommand};
pub use form::{FormError, FormField, RuleForm};
pub use view::{config_text, rule_label, rule_rows, RuleRow};
