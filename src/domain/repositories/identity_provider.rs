use async_trait::async_trait;

use crate::domain::{
    error::IdentityProviderError,
    models::{email::Email, password::Password, user::FirebaseUid},
};

/// External system of record for credentials
#[async_trait]
pub trait IdentityProvider {
    /// Create an account and return its handle.
    /// An address that is already registered yields `IdentityProviderError::AlreadyExists`.
    async fn create_account(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<FirebaseUid, IdentityProviderError>;

    async fn delete_account(&self, firebase_uid: &str) -> Result<(), IdentityProviderError>;

    async fn exists_by_email(&self, email: &Email) -> Result<bool, IdentityProviderError>;
}
