use std::{error::Error as StdError, fmt};

use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors returned by the user usecases.
///
/// Every variant maps to exactly one [`ErrorKind`]. The `Display` output is
/// safe to show to callers; underlying causes are only reachable through
/// `source()`.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid email address")]
    InvalidEmail(#[source] EmailError),

    #[error("Password must be at least 8 characters and contain upper, lower, digit and symbol")]
    WeakPassword(#[source] PasswordError),

    #[error("Email address is already registered: {email}")]
    DuplicateEmail {
        email: String,
        #[source]
        source: BoxError,
    },

    #[error("User not found")]
    UserNotFound,

    #[error("Identity provider error")]
    IdentityProviderFailure(#[source] IdentityProviderError),

    #[error("Database error")]
    DatabaseFailure(#[source] BoxError),

    #[error("Token generation failed")]
    TokenGenerationFailure(#[source] TokenError),
}

impl From<EmailError> for DomainError {
    fn from(err: EmailError) -> Self {
        Self::InvalidEmail(err)
    }
}

impl From<PasswordError> for DomainError {
    fn from(err: PasswordError) -> Self {
        Self::WeakPassword(err)
    }
}

impl From<TokenError> for DomainError {
    fn from(err: TokenError) -> Self {
        Self::TokenGenerationFailure(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidEmail,
    WeakPassword,
    DuplicateEmail,
    UserNotFound,
    IdentityProviderFailure,
    DatabaseFailure,
    TokenGenerationFailure,
}

impl ErrorKind {
    /// Stable machine-readable code, used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::IdentityProviderFailure => "IDENTITY_PROVIDER_FAILURE",
            Self::DatabaseFailure => "DATABASE_FAILURE",
            Self::TokenGenerationFailure => "TOKEN_GENERATION_FAILURE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidEmail(_) => ErrorKind::InvalidEmail,
            Self::WeakPassword(_) => ErrorKind::WeakPassword,
            Self::DuplicateEmail { .. } => ErrorKind::DuplicateEmail,
            Self::UserNotFound => ErrorKind::UserNotFound,
            Self::IdentityProviderFailure(_) => ErrorKind::IdentityProviderFailure,
            Self::DatabaseFailure(_) => ErrorKind::DatabaseFailure,
            Self::TokenGenerationFailure(_) => ErrorKind::TokenGenerationFailure,
        }
    }

    pub fn duplicate_email(email: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
            source: source.into(),
        }
    }

    pub fn database(source: impl Into<BoxError>) -> Self {
        Self::DatabaseFailure(source.into())
    }
}

/// Returns true when `err`, or anything in its `source()` chain, is a [`DomainError`].
pub fn is_user_domain_error(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<DomainError>() {
            return true;
        }
        current = e.source();
    }
    false
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,

    #[error("email cannot contain spaces")]
    ContainsSpace,

    #[error("invalid email format: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("password must be at least {min} characters")]
    TooShort { min: usize },

    #[error("password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("password must contain at least one digit")]
    MissingDigit,

    #[error("password must contain at least one symbol")]
    MissingSymbol,

    #[error("failed to hash password: {0}")]
    Hashing(String),
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("firebase_uid cannot be empty")]
    EmptyFirebaseUid,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[derive(Debug, Error)]
pub enum IdentityProviderError {
    #[error("account already exists: {0}")]
    AlreadyExists(String),

    #[error("account not found: {0}")]
    NotFound(String),

    #[error("identity provider request failed: {0}")]
    Provider(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(String),

    #[error("unexpected signing method: {0}")]
    UnexpectedAlgorithm(String),

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token is not valid yet")]
    NotYetValid,

    #[error("unexpected token type: {0}")]
    UnexpectedType(String),

    #[error("malformed token: {0}")]
    Malformed(String),
}
