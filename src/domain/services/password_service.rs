use crate::domain::{
    error::PasswordError,
    models::password::{HashedPassword, Password},
};

/// Service for hashing passwords before they are handed to custody
pub trait PasswordHasher: Send + Sync {
    /// Hash a validated password
    fn hash(&self, password: &Password) -> Result<HashedPassword, PasswordError>;
}
