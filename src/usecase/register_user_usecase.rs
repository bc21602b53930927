use std::fmt;

use crate::domain::{
    error::{DomainError, IdentityProviderError, RepositoryError},
    models::{email::Email, password::Password, user::User},
    repositories::{identity_provider::IdentityProvider, user_repository::UserRepository},
    services::token_service::{TokenIssuer, TokenPair},
};

#[derive(Debug)]
pub struct RegisterUserResult {
    pub user: User,
    pub tokens: TokenPair,
}

/// Steps of a registration, in order. Used to label failures in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RegistrationStep {
    BuildingEntity,
    Persisting,
    IssuingTokens,
}

impl fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BuildingEntity => "building_entity",
            Self::Persisting => "persisting",
            Self::IssuingTokens => "issuing_tokens",
        })
    }
}

/// Registers a user in the identity provider and the record store, then
/// issues a token pair.
///
/// The two stores are not transactional. Once the identity account exists,
/// any later failure triggers one best-effort deletion of that account; the
/// caller always sees the original failure. Nothing is retried.
pub struct RegisterUserUsecase<I: IdentityProvider, R: UserRepository, T: TokenIssuer> {
    identity_provider: I,
    user_repository: R,
    token_issuer: T,
}

impl<I: IdentityProvider, R: UserRepository, T: TokenIssuer> RegisterUserUsecase<I, R, T> {
    pub fn new(identity_provider: I, user_repository: R, token_issuer: T) -> Self {
        Self {
            identity_provider,
            user_repository,
            token_issuer,
        }
    }

    pub async fn execute(&self, email: &str, password: &str) -> Result<RegisterUserResult, DomainError>
    where
        I: Send + Sync,
        R: Send + Sync,
    {
        // Validation never touches an external system
        let email = Email::new(email)?;
        let password = Password::new(password)?;

        let firebase_uid = match self.identity_provider.create_account(&email, &password).await {
            Ok(uid) => uid,
            Err(err @ IdentityProviderError::AlreadyExists(_)) => {
                tracing::info!(email = %email, "registration rejected: account already exists");
                return Err(DomainError::duplicate_email(email.as_str(), err));
            }
            Err(err) => {
                tracing::error!(error = %err, "identity provider failed to create account");
                return Err(DomainError::IdentityProviderFailure(err));
            }
        };

        let user = match User::new(firebase_uid.clone(), email.clone()) {
            Ok(user) => user,
            Err(err) => {
                self.compensate(&firebase_uid, RegistrationStep::BuildingEntity, &err)
                    .await;
                return Err(DomainError::database(err));
            }
        };

        if let Err(err) = self.user_repository.save(&user).await {
            self.compensate(&firebase_uid, RegistrationStep::Persisting, &err)
                .await;
            return Err(match err {
                err @ RepositoryError::Duplicate(_) => {
                    DomainError::duplicate_email(email.as_str(), err)
                }
                err => DomainError::database(err),
            });
        }

        let public_id = user.public_id().to_string();
        let tokens = match self.token_issuer.generate_token_pair(&public_id, &firebase_uid) {
            Ok(tokens) => tokens,
            Err(err) => {
                // The stored row is kept; only the identity account is rolled back.
                self.compensate(&firebase_uid, RegistrationStep::IssuingTokens, &err)
                    .await;
                tracing::warn!(
                    public_id = %public_id,
                    "user row left without identity account after token failure"
                );
                return Err(DomainError::TokenGenerationFailure(err));
            }
        };

        tracing::info!(public_id = %public_id, "user registered");
        Ok(RegisterUserResult { user, tokens })
    }

    /// Deletes the identity account created earlier in this registration.
    /// Failure here is logged and swallowed.
    async fn compensate(&self, firebase_uid: &str, failed_at: RegistrationStep, cause: &(dyn fmt::Display + Sync))
    where
        I: Send + Sync,
    {
        tracing::warn!(
            firebase_uid,
            step = %failed_at,
            cause = %cause,
            "registration failed, deleting identity account"
        );

        if let Err(err) = self.identity_provider.delete_account(firebase_uid).await {
            tracing::error!(
                firebase_uid,
                step = %failed_at,
                error = %err,
                "compensation failed, identity account is orphaned"
            );
        }
    }
}
