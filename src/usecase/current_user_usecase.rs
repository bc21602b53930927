use uuid::Uuid;

use crate::domain::{
    error::{DomainError, TokenError},
    models::user::{PublicId, User},
    repositories::user_repository::UserRepository,
    services::token_service::{TokenIssuer, TokenType},
};

/// Resolves the user behind an access token.
pub struct CurrentUserUsecase<R: UserRepository, T: TokenIssuer> {
    user_repository: R,
    token_issuer: T,
}

impl<R: UserRepository, T: TokenIssuer> CurrentUserUsecase<R, T> {
    pub fn new(user_repository: R, token_issuer: T) -> Self {
        Self {
            user_repository,
            token_issuer,
        }
    }

    pub async fn execute(&self, access_token: &str) -> Result<User, DomainError>
    where
        R: Send + Sync,
    {
        let claims = self.token_issuer.validate_token(access_token)?;
        if claims.token_type != TokenType::Access {
            return Err(TokenError::UnexpectedType(claims.token_type.to_string()).into());
        }

        let public_id = Uuid::parse_str(&claims.user_id)
            .map(PublicId::from_uuid)
            .map_err(|e| TokenError::Malformed(e.to_string()))?;

        let user = self
            .user_repository
            .find_by_public_id(&public_id)
            .await
            .map_err(DomainError::database)?
            .ok_or(DomainError::UserNotFound)?;

        // Soft-deleted users and rows whose identity account was replaced do not resolve.
        if user.is_deleted() || user.firebase_uid() != claims.firebase_uid {
            return Err(DomainError::UserNotFound);
        }
        Ok(user)
    }
}
