// File: tramite-site/src/form/field.rs
// Purpose: One named form control and its validity state

use tramite_validation::{trim_value, validate_field};

use crate::config::FieldConfig;
use crate::dom::Dom;

/// Validity of a field's current value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    /// Not validated since the form was attached or last reset
    #[default]
    Untouched,
    Valid,
    Invalid,
}

/// A named form control.
///
/// Holds the last value read from the page and the outcome of validating
/// it. The error message is non-empty exactly when the field is Invalid.
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
    id: String,
    group_id: String,
    error_slot_id: String,
    required: bool,
    value: String,
    validity: Validity,
    error: Option<&'static str>,
}

impl Field {
    pub fn from_config(config: &FieldConfig) -> Self {
        Self {
            name: config.name.clone(),
            id: config.id.clone(),
            group_id: config.group_id(),
            error_slot_id: config.error_slot_id(),
            required: config.required,
            value: String::new(),
            validity: Validity::Untouched,
            error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn required(&self) -> bool {
        self.required
    }

    /// Raw (untrimmed) value as last read
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    /// Message for the error slot; empty unless Invalid
    pub fn error_message(&self) -> &'static str {
        self.error.unwrap_or("")
    }

    pub fn has_content(&self) -> bool {
        !trim_value(&self.value).is_empty()
    }

    /// Validate `raw` and store the outcome; returns validity
    pub fn evaluate(&mut self, raw: String) -> bool {
        let outcome = validate_field(&self.name, &raw, self.required);
        self.value = raw;
        match outcome {
            Ok(()) => {
                self.validity = Validity::Valid;
                self.error = None;
                true
            }
            Err(err) => {
                self.validity = Validity::Invalid;
                self.error = Some(err.message());
                false
            }
        }
    }

    /// Forget validation state after the form was cleared
    pub fn reset(&mut self, value: String) {
        self.value = value;
        self.validity = Validity::Untouched;
        self.error = None;
    }

    /// Write the state to the page: group classes, error slot, aria-invalid
    pub fn render(&self, dom: &dyn Dom) {
        let invalid = self.validity == Validity::Invalid;
        let success = self.validity == Validity::Valid && self.has_content();

        dom.toggle_class(&self.group_id, "error", invalid);
        dom.toggle_class(&self.group_id, "success", success);
        dom.set_text(&self.error_slot_id, self.error_message());
        dom.set_attribute(&self.id, "aria-invalid", if invalid { "true" } else { "false" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use pretty_assertions::assert_eq;

    fn email_field() -> Field {
        Field::from_config(&FieldConfig::new("email", "email", true))
    }

    #[test]
    fn test_new_field_is_untouched() {
        let field = email_field();
        assert_eq!(field.validity(), Validity::Untouched);
        assert_eq!(field.error_message(), "");
        assert_eq!(field.group_id(), "email-group");
    }

    #[test]
    fn test_message_present_iff_invalid() {
        let mut field = email_field();
        assert!(!field.evaluate("bad-email".into()));
        assert_eq!(field.validity(), Validity::Invalid);
        assert_eq!(field.error_message(), "Inserisci un'email valida");

        assert!(field.evaluate("al@example.com".into()));
        assert_eq!(field.validity(), Validity::Valid);
        assert_eq!(field.error_message(), "");
    }

    #[test]
    fn test_value_kept_raw() {
        let mut field = email_field();
        field.evaluate("  al@example.com ".into());
        assert_eq!(field.value(), "  al@example.com ");
    }

    #[test]
    fn test_render_valid_empty_optional_field_has_no_success() {
        let dom = MemoryDom::new();
        dom.insert("phone").insert("phone-group").insert("phone-error");
        let mut field = Field::from_config(&FieldConfig::new("phone", "phone", false));

        field.evaluate(String::new());
        field.render(&dom);

        assert!(!dom.has_class("phone-group", "error"));
        assert!(!dom.has_class("phone-group", "success"));
        assert_eq!(dom.attribute("phone", "aria-invalid").as_deref(), Some("false"));
    }

    #[test]
    fn test_render_invalid() {
        let dom = MemoryDom::new();
        dom.insert("email").insert("email-group").insert("email-error");
        let mut field = email_field();

        field.evaluate(String::new());
        field.render(&dom);

        assert!(dom.has_class("email-group", "error"));
        assert_eq!(dom.text("email-error"), "L'email è obbligatoria");
        assert_eq!(dom.attribute("email", "aria-invalid").as_deref(), Some("true"));
    }
}
