use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::{
        email::Email,
        user::{PublicId, User},
    },
};

/// Application-side store of user records.
///
/// `save` must report a uniqueness violation on email, public id or
/// firebase uid as [`RepositoryError::Duplicate`]; that constraint is the only
/// guard against two registrations racing for the same address.
#[async_trait]
pub trait UserRepository {
    async fn save(&self, user: &User) -> Result<(), RepositoryError>;
    async fn find_by_public_id(&self, public_id: &PublicId) -> Result<Option<User>, RepositoryError>;
    async fn find_by_firebase_uid(&self, firebase_uid: &str) -> Result<Option<User>, RepositoryError>;
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;
    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError>;
}
