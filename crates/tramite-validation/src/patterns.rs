// File: tramite-validation/src/patterns.rs
// Purpose: Shape checks for email and phone values

use once_cell::sync::Lazy;
use regex::Regex;

// local-part@domain.tld, tld letters only
pub(crate) static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

// 7 to 20 of: ASCII digits, whitespace, + ( ) -
pub(crate) static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9\s+()\-]{7,20}$").expect("phone pattern compiles")
});

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Validate phone number format
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Whitespace stripped by the browser's `String.prototype.trim`.
///
/// Unicode `White_Space` plus the byte order mark, minus NEL (U+0085).
pub fn is_form_whitespace(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{85}')
}

/// Strip leading and trailing form whitespace
pub fn trim_value(value: &str) -> &str {
    value.trim_matches(is_form_whitespace)
}

/// Length of the trimmed value in UTF-16 code units, as the page measures it
pub fn trimmed_len(value: &str) -> usize {
    trim_value(value).encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("al@example.com")]
    #[case("mario.rossi@tramite.it")]
    #[case("first_last-1@sub.domain.co")]
    #[case("a@b.cd")]
    fn test_valid_emails(#[case] email: &str) {
        assert!(is_valid_email(email), "{email} should be accepted");
    }

    #[rstest]
    #[case("")]
    #[case("bad-email")]
    #[case("user@example")]
    #[case("user@example.c")]
    #[case("user+tag@example.com")]
    #[case("user@exa_mple.com")]
    #[case("user@example.c0m")]
    #[case("user @example.com")]
    fn test_invalid_emails(#[case] email: &str) {
        assert!(!is_valid_email(email), "{email} should be rejected");
    }

    #[rstest]
    #[case("1234567")]
    #[case("+39 (02) 123-4567")]
    #[case("02 1234 5678")]
    #[case("12345678901234567890")]
    fn test_valid_phones(#[case] phone: &str) {
        assert!(is_valid_phone(phone));
    }

    #[rstest]
    #[case("123456")]
    #[case("123456789012345678901")]
    #[case("call me 123")]
    #[case("0212.34567")]
    fn test_invalid_phones(#[case] phone: &str) {
        assert!(!is_valid_phone(phone));
    }

    #[rstest]
    #[case("  Al  ", 2)]
    #[case("Zoë", 3)]
    #[case("   ", 0)]
    #[case("😀", 2)]
    #[case("\u{FEFF}A\u{FEFF}", 1)]
    #[case("\u{A0}\u{2028}Al\u{3000}", 2)]
    #[case("\u{85}A", 2)]
    fn test_trimmed_len_counts_utf16_units(#[case] value: &str, #[case] expected: usize) {
        assert_eq!(trimmed_len(value), expected);
    }

    #[test]
    fn test_trim_value_keeps_inner_whitespace() {
        assert_eq!(trim_value("\u{FEFF} Mario Rossi\t\n"), "Mario Rossi");
        assert_eq!(trim_value("\u{85}x"), "\u{85}x");
    }
}
