// File: tramite-validation/src/rules.rs
// Purpose: Per-field rule table for the quote form

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::patterns::{trimmed_len, EMAIL_REGEX, PHONE_REGEX};

/// Message used when a required field has no rule of its own
pub const DEFAULT_REQUIRED_MESSAGE: &str = "Campo obbligatorio";

/// Extra check applied to a non-empty value
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    /// Trimmed value must be at least this many UTF-16 code units long
    MinChars(usize),
    /// Trimmed value must match the whole pattern
    Matches(&'static Lazy<Regex>),
}

impl Predicate {
    /// Whether `value` (already trimmed) passes this predicate
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Predicate::MinChars(min) => trimmed_len(value) >= *min,
            Predicate::Matches(pattern) => pattern.is_match(value),
        }
    }
}

/// Validation rule for one field name
#[derive(Debug, Clone, Copy)]
pub struct ValidationRule {
    pub required_message: &'static str,
    pub predicate: Option<Predicate>,
    pub invalid_message: &'static str,
}

impl ValidationRule {
    const fn presence_only() -> Self {
        Self {
            required_message: DEFAULT_REQUIRED_MESSAGE,
            predicate: None,
            invalid_message: "",
        }
    }
}

static FALLBACK_RULE: ValidationRule = ValidationRule::presence_only();

static RULES: Lazy<HashMap<&'static str, ValidationRule>> = Lazy::new(|| {
    let mut rules = HashMap::new();
    rules.insert(
        "name",
        ValidationRule {
            required_message: "Il nome è obbligatorio",
            predicate: Some(Predicate::MinChars(2)),
            invalid_message: "Il nome deve avere almeno 2 caratteri",
        },
    );
    rules.insert(
        "email",
        ValidationRule {
            required_message: "L'email è obbligatoria",
            predicate: Some(Predicate::Matches(&EMAIL_REGEX)),
            invalid_message: "Inserisci un'email valida",
        },
    );
    rules.insert(
        "message",
        ValidationRule {
            required_message: "Il messaggio è obbligatorio",
            predicate: Some(Predicate::MinChars(20)),
            invalid_message: "Il messaggio deve avere almeno 20 caratteri",
        },
    );
    rules.insert(
        "phone",
        ValidationRule {
            predicate: Some(Predicate::Matches(&PHONE_REGEX)),
            invalid_message: "Inserisci un numero valido",
            ..ValidationRule::presence_only()
        },
    );
    rules
});

/// Look up the rule for a field name.
///
/// Names without an entry get a presence-only rule.
pub fn rule_for(name: &str) -> &'static ValidationRule {
    RULES.get(name).unwrap_or(&FALLBACK_RULE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_rules() {
        assert_eq!(rule_for("name").required_message, "Il nome è obbligatorio");
        assert_eq!(rule_for("email").invalid_message, "Inserisci un'email valida");
        assert_eq!(
            rule_for("message").invalid_message,
            "Il messaggio deve avere almeno 20 caratteri"
        );
    }

    #[test]
    fn test_phone_has_no_required_message_of_its_own() {
        assert_eq!(rule_for("phone").required_message, DEFAULT_REQUIRED_MESSAGE);
        assert_eq!(rule_for("phone").invalid_message, "Inserisci un numero valido");
    }

    #[test]
    fn test_unknown_field_is_presence_only() {
        let rule = rule_for("company");
        assert!(rule.predicate.is_none());
        assert_eq!(rule.required_message, DEFAULT_REQUIRED_MESSAGE);
    }

    #[test]
    fn test_min_chars_uses_trimmed_length() {
        let predicate = Predicate::MinChars(2);
        assert!(predicate.accepts("Al"));
        assert!(!predicate.accepts(" A "));
        assert!(predicate.accepts("𝒜"));
    }
}
