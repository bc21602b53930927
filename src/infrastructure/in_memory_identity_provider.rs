use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    error::IdentityProviderError,
    models::{
        email::Email,
        password::{HashedPassword, Password},
        user::FirebaseUid,
    },
    repositories::identity_provider::IdentityProvider,
    services::password_service::PasswordHasher,
};

#[derive(Debug, Clone)]
struct Account {
    firebase_uid: FirebaseUid,
    // held in custody, never read back
    #[cfg_attr(not(test), allow(dead_code))]
    password_hash: HashedPassword,
}

/// Process-local identity provider.
///
/// Accounts are keyed by email and live only as long as the process. Handles
/// are 28-character alphanumeric strings, the same shape Firebase issues.
#[derive(Clone)]
pub struct InMemoryIdentityProvider<P: PasswordHasher> {
    accounts: Arc<RwLock<HashMap<Email, Account>>>,
    password_hasher: P,
}

impl<P: PasswordHasher> InMemoryIdentityProvider<P> {
    pub fn new(password_hasher: P) -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            password_hasher,
        }
    }

    #[cfg(test)]
    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.len()
    }
}

fn generate_uid() -> FirebaseUid {
    let mut uid = Uuid::new_v4().simple().to_string();
    uid.truncate(28);
    uid
}

#[async_trait]
impl<P: PasswordHasher> IdentityProvider for InMemoryIdentityProvider<P> {
    async fn create_account(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<FirebaseUid, IdentityProviderError> {
        let password_hash = self
            .password_hasher
            .hash(password)
            .map_err(|e| IdentityProviderError::Provider(e.to_string()))?;

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email) {
            return Err(IdentityProviderError::AlreadyExists(email.to_string()));
        }

        let firebase_uid = generate_uid();
        accounts.insert(
            email.clone(),
            Account {
                firebase_uid: firebase_uid.clone(),
                password_hash,
            },
        );
        tracing::debug!(firebase_uid = %firebase_uid, "identity account created");
        Ok(firebase_uid)
    }

    async fn delete_account(&self, firebase_uid: &str) -> Result<(), IdentityProviderError> {
        let mut accounts = self.accounts.write().await;
        let before = accounts.len();
        accounts.retain(|_, account| account.firebase_uid != firebase_uid);

        if accounts.len() == before {
            return Err(IdentityProviderError::NotFound(firebase_uid.to_string()));
        }
        tracing::debug!(firebase_uid = %firebase_uid, "identity account deleted");
        Ok(())
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, IdentityProviderError> {
        Ok(self.accounts.read().await.contains_key(email))
    }
}
