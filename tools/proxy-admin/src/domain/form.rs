//! New-rule form: the `pattern`, `action` and `proxy` input fields.

use thiserror::Error;

use crate::api::Rule;

/// Local validation failures on submit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Pattern is required")]
    EmptyPattern,
}

/// Input fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Pattern,
    Action,
    Proxy,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Pattern, FormField::Action, FormField::Proxy];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Pattern => "Pattern",
            FormField::Action => "Action",
            FormField::Proxy => "Proxy",
        }
    }

    /// Next field, or `None` past the last one.
    pub fn next(&self) -> Option<FormField> {
        match self {
            FormField::Pattern => Some(FormField::Action),
            FormField::Action => Some(FormField::Proxy),
            FormField::Proxy => None,
        }
    }

    /// Previous field, or `None` before the first one.
    pub fn prev(&self) -> Option<FormField> {
        match self {
            FormField::Pattern => None,
            FormField::Action => Some(FormField::Pattern),
            FormField::Proxy => Some(FormField::Action),
        }
    }
}

/// Current contents of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleForm {
    pub pattern: String,
    pub action: String,
    pub proxy: String,
}

impl RuleForm {
    /// Empty form with the action field prefilled.
    pub fn new(default_action: impl Into<String>) -> Self {
        Self {
            pattern: String::new(),
            action: default_action.into(),
            proxy: String::new(),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Pattern => &self.pattern,
            FormField::Action => &self.action,
            FormField::Proxy => &self.proxy,
        }
    }

    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Pattern => &mut self.pattern,
            FormField::Action => &mut self.action,
            FormField::Proxy => &mut self.proxy,
        }
    }

    /// Build the rule to submit. A blank proxy is left out entirely.
    pub fn to_rule(&self) -> Result<Rule, FormError> {
        if self.pattern.is_empty() {
            return Err(FormError::EmptyPattern);
        }

        let rule = Rule::new(self.pattern.clone(), self.action.clone());
        Ok(if self.proxy.is_empty() {
            rule
        } else {
            rule.with_proxy(self.proxy.clone())
        })
    }

    /// Reset after a submit. The action is kept.
    pub fn clear_submitted(&mut self) {
        self.pattern.clear();
        self.proxy.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pattern: &str, action: &str, proxy: &str) -> RuleForm {
        RuleForm {
            pattern: pattern.to_string(),
            action: action.to_string(),
            proxy: proxy.to_string(),
        }
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert_eq!(form("", "block", "p1").to_rule(), Err(FormError::EmptyPattern));
        assert_eq!(FormError::EmptyPattern.to_string(), "Pattern is required");
    }

    #[test]
    fn test_whitespace_pattern_is_not_empty() {
        assert_eq!(form(" ", "block", "").to_rule(), Ok(Rule::new(" ", "block")));
    }

    #[test]
    fn test_blank_proxy_left_out() {
        let rule = form("x.com", "allow", "").to_rule().unwrap();
        assert_eq!(rule.proxy, None);
    }

    #[test]
    fn test_proxy_kept_when_given() {
        let rule = form("x.com", "proxy", "p2").to_rule().unwrap();
        assert_eq!(rule.proxy.as_deref(), Some("p2"));
    }

    #[test]
    fn test_clear_keeps_action() {
        let mut f = form("x.com", "proxy", "p2");
        f.clear_submitted();
        assert_eq!(f, form("", "proxy", ""));
    }

    #[test]
    fn test_field_order() {
        assert_eq!(FormField::Pattern.next(), Some(FormField::Action));
        assert_eq!(FormField::Proxy.next(), None);
        assert_eq!(FormField::Pattern.prev(), None);
    }
}
