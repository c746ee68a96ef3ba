//! Tramite Validation
//!
//! Field rules for the Tramite quote form. Pure functions of
//! `(name, value, required)` with no DOM access, shared by the page
//! controller in `tramite-site` and the `validateField` export of the
//! WASM host.

pub mod patterns;
pub mod rules;

pub use patterns::{is_form_whitespace, is_valid_email, is_valid_phone, trim_value, trimmed_len};
pub use rules::{rule_for, Predicate, ValidationRule, DEFAULT_REQUIRED_MESSAGE};

/// Why a field value was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Required field left empty
    #[error("{0}")]
    Required(&'static str),
    /// Non-empty value failed the field's predicate
    #[error("{0}")]
    Invalid(&'static str),
}

impl FieldError {
    /// Message shown in the field's error slot
    pub fn message(&self) -> &'static str {
        match self {
            FieldError::Required(message) | FieldError::Invalid(message) => message,
        }
    }
}

/// Validate one field value.
///
/// The value is trimmed first. An empty required value fails with the
/// field's required message; a non-empty value is checked against the
/// predicate registered for `name`. Empty optional values always pass.
///
/// # Example
///
/// ```
/// use tramite_validation::{validate_field, FieldError};
///
/// assert!(validate_field("email", "al@example.com", true).is_ok());
/// assert_eq!(
///     validate_field("email", "bad-email", true),
///     Err(FieldError::Invalid("Inserisci un'email valida"))
/// );
/// ```
pub fn validate_field(name: &str, value: &str, required: bool) -> Result<(), FieldError> {
    let value = trim_value(value);
    let rule = rule_for(name);

    if value.is_empty() {
        return if required {
            Err(FieldError::Required(rule.required_message))
        } else {
            Ok(())
        };
    }

    match rule.predicate {
        Some(predicate) if !predicate.accepts(value) => {
            Err(FieldError::Invalid(rule.invalid_message))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("name", "", true, Err(FieldError::Required("Il nome è obbligatorio")))]
    #[case("name", "   ", true, Err(FieldError::Required("Il nome è obbligatorio")))]
    #[case("name", "A", true, Err(FieldError::Invalid("Il nome deve avere almeno 2 caratteri")))]
    #[case("name", "Al", true, Ok(()))]
    #[case("email", "", true, Err(FieldError::Required("L'email è obbligatoria")))]
    #[case("email", "bad-email", true, Err(FieldError::Invalid("Inserisci un'email valida")))]
    #[case("email", "  al@example.com  ", true, Ok(()))]
    #[case("message", "troppo corto", true, Err(FieldError::Invalid("Il messaggio deve avere almeno 20 caratteri")))]
    #[case("message", "Vorrei un preventivo per il sito", true, Ok(()))]
    #[case("phone", "", false, Ok(()))]
    #[case("phone", "12", false, Err(FieldError::Invalid("Inserisci un numero valido")))]
    #[case("phone", "", true, Err(FieldError::Required("Campo obbligatorio")))]
    #[case("company", "", true, Err(FieldError::Required("Campo obbligatorio")))]
    #[case("company", "x", true, Ok(()))]
    #[case("company", "", false, Ok(()))]
    #[case("name", "😀", true, Ok(()))]
    #[case("name", "\u{FEFF}A", true, Err(FieldError::Invalid("Il nome deve avere almeno 2 caratteri")))]
    #[case("name", "\u{FEFF}\u{A0}", true, Err(FieldError::Required("Il nome è obbligatorio")))]
    #[case("message", "😀😀😀😀😀😀😀😀😀😀", true, Ok(()))]
    #[case("message", "😀😀😀😀😀😀😀😀😀", true, Err(FieldError::Invalid("Il messaggio deve avere almeno 20 caratteri")))]
    #[case("email", "\u{FEFF}al@example.com", true, Ok(()))]
    fn test_validate_field(
        #[case] name: &str,
        #[case] value: &str,
        #[case] required: bool,
        #[case] expected: Result<(), FieldError>,
    ) {
        assert_eq!(validate_field(name, value, required), expected);
    }

    #[test]
    fn test_optional_field_still_checks_non_empty_value() {
        assert!(validate_field("email", "nope", false).is_err());
        assert!(validate_field("name", "A", false).is_err());
    }

    #[test]
    fn test_error_message_and_display_agree() {
        let err = FieldError::Invalid("Inserisci un'email valida");
        assert_eq!(err.message(), "Inserisci un'email valida");
        assert_eq!(err.to_string(), "Inserisci un'email valida");
    }
}
