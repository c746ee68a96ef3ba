/// Property tests for the quote form rules
///
/// Checks the length thresholds and the email shape against generated
/// inputs, and that validation is a pure function of its arguments.
use proptest::prelude::*;
use tramite_validation::{trim_value, trimmed_len, validate_field, FieldError};

proptest! {
    #[test]
    fn name_valid_iff_two_trimmed_chars(value in "\\PC{0,12}") {
        let outcome = validate_field("name", &value, true);
        prop_assert_eq!(outcome.is_ok(), trimmed_len(&value) >= 2);
    }

    #[test]
    fn message_valid_iff_twenty_trimmed_chars(value in "[ a-zà-ù\\t]{0,40}") {
        let outcome = validate_field("message", &value, true);
        prop_assert_eq!(outcome.is_ok(), trimmed_len(&value) >= 20);
    }

    #[test]
    fn astral_characters_count_twice(emoji in "[\u{1F600}-\u{1F64F}]{0,14}") {
        let units = emoji.chars().count() * 2;
        prop_assert_eq!(trimmed_len(&emoji), units);
        prop_assert_eq!(validate_field("message", &emoji, true).is_ok(), units >= 20);
    }

    #[test]
    fn byte_order_mark_is_trimmed(value in "[a-z]{0,8}", marks in 0usize..3) {
        let bom = "\u{FEFF}".repeat(marks);
        let padded = format!("{bom}{value}{bom}");
        prop_assert_eq!(trim_value(&padded), value.as_str());
        prop_assert_eq!(
            validate_field("name", &padded, true),
            validate_field("name", &value, true)
        );
    }

    #[test]
    fn generated_emails_are_accepted(
        local in "[a-zA-Z0-9._-]{1,16}",
        domain in "[a-zA-Z0-9-]{1,12}",
        tld in "[a-zA-Z]{2,6}",
    ) {
        let email = format!("{local}@{domain}.{tld}");
        prop_assert!(validate_field("email", &email, true).is_ok());
    }

    #[test]
    fn emails_without_at_are_rejected(value in "[a-zA-Z0-9._-]{1,24}") {
        prop_assert_eq!(
            validate_field("email", &value, true),
            Err(FieldError::Invalid("Inserisci un'email valida"))
        );
    }

    #[test]
    fn emails_with_short_tld_are_rejected(
        local in "[a-z]{1,8}",
        domain in "[a-z]{1,8}",
        tld in "[a-z]",
    ) {
        let email = format!("{local}@{domain}.{tld}");
        prop_assert!(validate_field("email", &email, true).is_err());
    }

    #[test]
    fn validation_is_deterministic(
        name in prop_oneof![Just("name"), Just("email"), Just("message"), Just("phone"), Just("other")],
        value in "\\PC{0,30}",
        required in any::<bool>(),
    ) {
        prop_assert_eq!(
            validate_field(name, &value, required),
            validate_field(name, &value, required)
        );
    }

    #[test]
    fn surrounding_whitespace_is_ignored(value in "[a-z@.]{0,24}", pad in "[ \\t]{0,4}") {
        let padded = format!("{pad}{value}{pad}");
        prop_assert_eq!(
            validate_field("email", &padded, true),
            validate_field("email", &value, true)
        );
    }
}
