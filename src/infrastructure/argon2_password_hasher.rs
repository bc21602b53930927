use argon2::{
    Argon2,
    password_hash::{PasswordHasher as Argon2Hasher, SaltString, rand_core::OsRng},
};

use crate::domain::{
    error::PasswordError,
    models::password::{HashedPassword, Password},
    services::password_service::PasswordHasher,
};

#[derive(Clone)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<HashedPassword, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(password.expose().as_bytes(), &salt)
            .map_err(|e| PasswordError::Hashing(e.to_string()))?
            .to_string();

        Ok(HashedPassword::new(hash))
    }
}

#[cfg(test)]
mod tests {
    use argon2::{PasswordHash, PasswordVerifier};

    use super::*;

    #[test]
    fn hash_is_argon2id_phc_string() {
        let hasher = Argon2PasswordHasher::new();
        let password = Password::new("Password1!").unwrap();

        let hashed = hasher.hash(&password).unwrap();

        assert_ne!(hashed.as_str(), password.expose());
        assert!(hashed.as_str().starts_with("$argon2id$"));

        let parsed = PasswordHash::new(hashed.as_str()).unwrap();
        assert!(Argon2::default().verify_password(b"Password1!", &parsed).is_ok());
        assert!(Argon2::default().verify_password(b"Password2!", &parsed).is_err());
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = Argon2PasswordHasher::new();
        let password = Password::new("Password1!").unwrap();

        let a = hasher.hash(&password).unwrap();
        let b = hasher.hash(&password).unwrap();

        assert_ne!(a, b);
    }

}
