use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::domain::error::EmailError;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$")
        .expect("hardcoded email regex is invalid")
});

/// Value object holding a trimmed, well-formed email address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(value: &str) -> Result<Self, EmailError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(EmailError::Empty);
        }
        if trimmed.contains(' ') {
            return Err(EmailError::ContainsSpace);
        }
        if !EMAIL_REGEX.is_match(trimmed) {
            return Err(EmailError::InvalidFormat(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("test@example.com")]
    #[case("user.name@domain.co.jp")]
    #[case("first+tag@sub.example.org")]
    #[case("a_b%c-d@x-y.io")]
    fn accepts_valid_addresses(#[case] raw: &str) {
        let email = Email::new(raw).unwrap();
        assert_eq!(email.as_str(), raw);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let email = Email::new("  test@example.com\t").unwrap();
        assert_eq!(email.as_str(), "test@example.com");
    }

    #[rstest]
    #[case("", EmailError::Empty)]
    #[case("   ", EmailError::Empty)]
    #[case("te st@example.com", EmailError::ContainsSpace)]
    #[case("test@exa mple.com", EmailError::ContainsSpace)]
    fn rejects_empty_and_spaced(#[case] raw: &str, #[case] expected: EmailError) {
        assert_eq!(Email::new(raw).unwrap_err(), expected);
    }

    #[rstest]
    #[case("invalid-email")]
    #[case("test.example.com")]
    #[case("@example.com")]
    #[case("test@")]
    #[case("test@example")]
    #[case("test@example.c")]
    #[case("test@example.c0m")]
    #[case("te<st@example.com")]
    fn rejects_malformed(#[case] raw: &str) {
        assert!(matches!(Email::new(raw), Err(EmailError::InvalidFormat(_))));
    }

    #[test]
    fn equality_is_by_value() {
        let a = Email::new("test@example.com").unwrap();
        let b = Email::new(" test@example.com ").unwrap();
        let c = Email::new("other@example.com").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
