//! Application state management.

use crate::api::{ProxyConfig, Rule};

use super::form::{FormField, RuleForm};
use super::view::{self, RuleRow};

/// Application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Main panel.
    #[default]
    Dashboard,
    /// Help overlay.
    Help,
    /// Blocking alert; any key dismisses it.
    Alert,
    /// Quitting.
    Quit,
}

/// Which pane receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Rules,
    Form(FormField),
}

/// Key input, decoupled from the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Enter,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Up,
    Down,
    PageUp,
    PageDown,
    Esc,
    /// Ctrl-C.
    Interrupt,
}

/// Work the panel must perform against the rule store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    Refresh,
    AddRule,
    DeleteRule(String),
}

/// Lines scrolled per PgUp/PgDn in the config pane.
const CONFIG_SCROLL_STEP: u16 = 10;

/// Main application model.
///
/// Holds only what is on screen: the rendered rule rows and config text
/// from the last successful fetch, plus the form inputs.
pub struct App {
    /// Current application state/view.
    pub state: AppState,
    /// Pane with key focus.
    pub focus: Focus,
    /// New-rule form inputs.
    pub form: RuleForm,
    /// Rendered rule list.
    pub rule_rows: Vec<RuleRow>,
    /// Index of the selected rule row.
    pub selected_rule: usize,
    /// Rendered configuration (`None` until first loaded).
    pub config_text: Option<String>,
    /// First visible line of the config pane.
    pub config_scroll: u16,
    /// Alert message shown while in `AppState::Alert`.
    pub alert: Option<String>,
    /// Last refresh timestamp.
    pub last_refresh: Option<chrono::DateTime<chrono::Utc>>,
    /// Error message to display (if any).
    pub error_message: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new("direct")
    }
}

impl App {
    /// Create a new application instance.
    pub fn new(default_action: impl Into<String>) -> Self {
        Self {
            state: AppState::Dashboard,
            focus: Focus::Rules,
            form: RuleForm::new(default_action),
            rule_rows: Vec::new(),
            selected_rule: 0,
            config_text: None,
            config_scroll: 0,
            alert: None,
            last_refresh: None,
            error_message: None,
        }
    }

    /// Replace the rule list with freshly fetched rules.
    pub fn show_rules(&mut self, rules: &[Rule]) {
        self.rule_rows = view::rule_rows(rules);
        if self.selected_rule >= self.rule_rows.len() {
            self.selected_rule = self.rule_rows.len().saturating_sub(1);
        }
        self.last_refresh = Some(chrono::Utc::now());
    }

    /// Replace the config pane with a freshly fetched configuration.
    pub fn show_config(&mut self, config: &ProxyConfig) {
        self.config_text = Some(view::config_text(config));
        self.last_refresh = Some(chrono::Utc::now());
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
        self.state = AppState::Alert;
    }

    /// Pattern of the selected rule row, if any.
    pub fn selected_pattern(&self) -> Option<&str> {
        self.rule_rows
            .get(self.selected_rule)
            .map(|row| row.pattern.as_str())
    }

    /// Handle keyboard input, returning any store operation it triggers.
    pub fn handle_key(&mut self, key: KeyInput) -> Option<PanelCommand> {
        if key == KeyInput::Interrupt {
            self.state = AppState::Quit;
            return None;
        }

        match self.state {
            AppState::Dashboard => match self.focus {
                Focus::Rules => self.handle_rules_key(key),
                Focus::Form(field) => self.handle_form_key(field, key),
            },
            AppState::Help => {
                // Any key closes help
                self.state = AppState::Dashboard;
                None
            }
            AppState::Alert => {
                self.alert = None;
                self.state = AppState::Dashboard;
                None
            }
            AppState::Quit => None,
        }
    }

    fn handle_rules_key(&mut self, key: KeyInput) -> Option<PanelCommand> {
        match key {
            KeyInput::Char('q') | KeyInput::Char('Q') | KeyInput::Esc => self.state = AppState::Quit,
            KeyInput::Char('?') => self.state = AppState::Help,
            KeyInput::Char('r') | KeyInput::Char('R') => return Some(PanelCommand::Refresh),
            KeyInput::Char('a') | KeyInput::Char('A') | KeyInput::Tab => {
                self.focus = Focus::Form(FormField::Pattern)
            }
            KeyInput::Char('d') | KeyInput::Char('D') | KeyInput::Delete => {
                return self
                    .selected_pattern()
                    .map(|pattern| PanelCommand::DeleteRule(pattern.to_string()));
            }
            KeyInput::Up => self.select_prev(),
            KeyInput::Down => self.select_next(),
            KeyInput::PageUp => self.scroll_config_up(),
            KeyInput::PageDown => self.scroll_config_down(),
            _ => {}
        }
        None
    }

    fn handle_form_key(&mut self, field: FormField, key: KeyInput) -> Option<PanelCommand> {
        match key {
            KeyInput::Char(c) => self.form.value_mut(field).push(c),
            KeyInput::Backspace => {
                self.form.value_mut(field).pop();
            }
            KeyInput::Enter => return Some(PanelCommand::AddRule),
            KeyInput::Tab | KeyInput::Down => {
                self.focus = field.next().map(Focus::Form).unwrap_or(Focus::Rules)
            }
            KeyInput::BackTab | KeyInput::Up => {
                self.focus = field.prev().map(Focus::Form).unwrap_or(Focus::Rules)
            }
            KeyInput::Esc => self.focus = Focus::Rules,
            KeyInput::PageUp => self.scroll_config_up(),
            KeyInput::PageDown => self.scroll_config_down(),
            _ => {}
        }
        None
    }

    /// Move selection up.
    pub fn select_prev(&mut self) {
        if self.rule_rows.is_empty() {
            return;
        }

        self.selected_rule = if self.selected_rule == 0 {
            self.rule_rows.len() - 1
        } else {
            self.selected_rule - 1
        };
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if self.rule_rows.is_empty() {
            return;
        }

        self.selected_rule = (self.selected_rule + 1) % self.rule_rows.len();
    }

    fn scroll_config_up(&mut self) {
        self.config_scroll = self.config_scroll.saturating_sub(CONFIG_SCROLL_STEP);
    }

    fn scroll_config_down(&mut self) {
        let lines = self
            .config_text
            .as_deref()
            .map(|text| text.lines().count())
            .unwrap_or(0);
        let max = u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX);
        self.config_scroll = self.config_scroll.saturating_add(CONFIG_SCROLL_STEP).min(max);
    }

    /// Check if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quit
    }
}
