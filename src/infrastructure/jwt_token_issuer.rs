use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};

use crate::domain::{
    error::TokenError,
    services::token_service::{Claims, TOKEN_ISSUER, Token, TokenIssuer, TokenPair, TokenType},
};

pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

// Only the HMAC family is accepted when verifying.
const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtTokenIssuer {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let secret = secret.as_ref();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    pub fn generate_access_token(&self, user_id: &str, firebase_uid: &str) -> Result<Token, TokenError> {
        self.sign(user_id, firebase_uid, TokenType::Access, Utc::now())
    }

    pub fn generate_refresh_token(&self, user_id: &str, firebase_uid: &str) -> Result<Token, TokenError> {
        self.sign(user_id, firebase_uid, TokenType::Refresh, Utc::now())
    }

    fn sign(
        &self,
        user_id: &str,
        firebase_uid: &str,
        token_type: TokenType,
        now: DateTime<Utc>,
    ) -> Result<Token, TokenError> {
        let exp = now + expiry(token_type);

        let claims = Claims {
            user_id: user_id.to_string(),
            firebase_uid: firebase_uid.to_string(),
            token_type,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            iss: TOKEN_ISSUER.to_string(),
            sub: user_id.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);
        validation
    }
}

fn expiry(token_type: TokenType) -> Duration {
    match token_type {
        TokenType::Access => Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
        TokenType::Refresh => Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidAlgorithm | ErrorKind::MissingAlgorithm => {
            TokenError::UnexpectedAlgorithm(err.to_string())
        }
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::ImmatureSignature => TokenError::NotYetValid,
        _ => TokenError::Malformed(err.to_string()),
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn generate_token_pair(&self, user_id: &str, firebase_uid: &str) -> Result<TokenPair, TokenError> {
        let now = Utc::now();
        let access_token = self.sign(user_id, firebase_uid, TokenType::Access, now)?;
        let refresh_token = self.sign(user_id, firebase_uid, TokenType::Refresh, now)?;
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &Self::validation())
            .map(|data| data.claims)
            .map_err(map_jwt_error)
    }
}
