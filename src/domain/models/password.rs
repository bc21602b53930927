use std::fmt;

use crate::domain::error::PasswordError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;':\",./<>?`~";

const MASK: &str = "********";

/// Value object holding a plain password that passed the strength rules.
///
/// The secret is only reachable through [`Password::expose`]; `Display` and
/// `Debug` both print a fixed mask.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Checks run in order: length, uppercase, lowercase, digit, symbol.
    /// The first one that fails is reported.
    pub fn new(value: &str) -> Result<Self, PasswordError> {
        if value.len() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if !value.chars().any(char::is_uppercase) {
            return Err(PasswordError::MissingUppercase);
        }
        if !value.chars().any(char::is_lowercase) {
            return Err(PasswordError::MissingLowercase);
        }
        if !value.chars().any(char::is_numeric) {
            return Err(PasswordError::MissingDigit);
        }
        if !value.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
            return Err(PasswordError::MissingSymbol);
        }
        Ok(Self(value.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(MASK)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Password").field(&MASK).finish()
    }
}

/// Value object representing a hashed password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Create a new HashedPassword from an already hashed string
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    /// Get the hash as a string slice
    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Password1!")]
    #[case("Password123!")]
    #[case("aB3$efgh")]
    #[case("Zz9~Zz9~Zz9~")]
    fn accepts_strong_passwords(#[case] raw: &str) {
        let password = Password::new(raw).unwrap();
        assert_eq!(password.expose(), raw);
    }

    #[rstest]
    #[case("Pa1!", PasswordError::TooShort { min: MIN_PASSWORD_LENGTH })]
    #[case("", PasswordError::TooShort { min: MIN_PASSWORD_LENGTH })]
    #[case("password123!", PasswordError::MissingUppercase)]
    #[case("PASSWORD123!", PasswordError::MissingLowercase)]
    #[case("PasswordTest!", PasswordError::MissingDigit)]
    #[case("Password123", PasswordError::MissingSymbol)]
    fn reports_first_unmet_rule(#[case] raw: &str, #[case] expected: PasswordError) {
        assert_eq!(Password::new(raw).unwrap_err(), expected);
    }

    #[test]
    fn short_wins_over_other_rules() {
        assert_eq!(
            Password::new("abc").unwrap_err(),
            PasswordError::TooShort { min: MIN_PASSWORD_LENGTH }
        );
    }

    #[rstest]
    #[case("Password\u{ff11}!")]
    #[case("Password\u{0663}!")]
    fn non_ascii_digits_count_as_digits(#[case] raw: &str) {
        assert!(Password::new(raw).is_ok());
    }

    #[test]
    fn symbol_outside_allowed_set_does_not_count() {
        assert_eq!(
            Password::new("Password123\u{00a7}").unwrap_err(),
            PasswordError::MissingSymbol
        );
    }

    #[test]
    fn rendering_is_masked() {
        let password = Password::new("Password1!").unwrap();
        assert_eq!(password.to_string(), "********");
        assert!(!format!("{password:?}").contains("Password1!"));
    }

    #[test]
    fn equality_compares_secret() {
        let a = Password::new("Password1!").unwrap();
        let b = Password::new("Password1!").unwrap();
        let c = Password::new("Password2!").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
