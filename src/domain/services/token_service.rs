use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::TokenError;

pub type Token = String;

pub const TOKEN_ISSUER: &str = "sleeve";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload carried by every issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,      // public id of the user
    pub firebase_uid: String, // identity provider handle
    pub token_type: TokenType,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub iss: String,
    pub sub: String,
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: Token,
    pub refresh_token: Token,
}

/// Signs and verifies session tokens.
///
/// Both tokens of a pair carry the same `user_id` and `firebase_uid` and
/// differ only in `token_type` and expiry.
pub trait TokenIssuer: Send + Sync {
    fn generate_token_pair(&self, user_id: &str, firebase_uid: &str) -> Result<TokenPair, TokenError>;
    fn validate_token(&self, token: &str) -> Result<Claims, TokenError>;
}
