use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{error::UserError, models::email::Email};

/// Account handle issued by the identity provider
pub type FirebaseUid = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicId(Uuid);
impl PublicId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PublicId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PublicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone)]
pub struct User {
    public_id: PublicId,
    firebase_uid: FirebaseUid,
    email: Email,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Builds a fresh user for registration with a newly generated public id.
    pub fn new(firebase_uid: FirebaseUid, email: Email) -> Result<Self, UserError> {
        if firebase_uid.is_empty() {
            return Err(UserError::EmptyFirebaseUid);
        }
        let now = Utc::now();
        Ok(Self {
            public_id: PublicId::new(),
            firebase_uid,
            email,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        })
    }

    /// Rebuilds a user read back from the record store.
    pub fn reconstruct(
        public_id: PublicId,
        firebase_uid: FirebaseUid,
        email: Email,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    ) -> Result<Self, UserError> {
        if firebase_uid.is_empty() {
            return Err(UserError::EmptyFirebaseUid);
        }
        Ok(Self {
            public_id,
            firebase_uid,
            email,
            created_at,
            updated_at,
            deleted_at,
        })
    }

    // getters only
    pub fn public_id(&self) -> &PublicId {
        &self.public_id
    }
    pub fn firebase_uid(&self) -> &str {
        &self.firebase_uid
    }
    pub fn email(&self) -> &Email {
        &self.email
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    const TEST_FIREBASE_UID: &str = "firebase_uid_123";

    fn email() -> Email {
        Email::new("test@example.com").unwrap()
    }

    #[test]
    fn new_user_gets_public_id_and_timestamps() {
        let user = User::new(TEST_FIREBASE_UID.to_string(), email()).unwrap();

        assert!(!user.public_id().as_uuid().is_nil());
        assert_eq!(user.firebase_uid(), TEST_FIREBASE_UID);
        assert_eq!(user.email(), &email());
        assert_eq!(user.created_at(), user.updated_at());
        assert!(user.deleted_at().is_none());
        assert!(!user.is_deleted());
    }

    #[test]
    fn new_users_never_share_a_public_id() {
        let a = User::new(TEST_FIREBASE_UID.to_string(), email()).unwrap();
        let b = User::new(TEST_FIREBASE_UID.to_string(), email()).unwrap();
        assert_ne!(a.public_id(), b.public_id());
    }

    #[test]
    fn empty_firebase_uid_is_rejected() {
        assert!(matches!(
            User::new(String::new(), email()),
            Err(UserError::EmptyFirebaseUid)
        ));
        assert!(matches!(
            User::reconstruct(PublicId::new(), String::new(), email(), Utc::now(), Utc::now(), None),
            Err(UserError::EmptyFirebaseUid)
        ));
    }

    #[test]
    fn reconstruct_keeps_stored_values() {
        let public_id = PublicId::new();
        let created_at = Utc::now() - Duration::hours(1);
        let updated_at = Utc::now();
        let deleted_at = Some(Utc::now());

        let user = User::reconstruct(
            public_id,
            TEST_FIREBASE_UID.to_string(),
            email(),
            created_at,
            updated_at,
            deleted_at,
        )
        .unwrap();

        assert_eq!(user.public_id(), &public_id);
        assert_eq!(user.created_at(), created_at);
        assert_eq!(user.updated_at(), updated_at);
        assert_eq!(user.deleted_at(), deleted_at);
        assert!(user.is_deleted());
    }
}
