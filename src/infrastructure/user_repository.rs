use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, RuntimeErr, SqlErr,
};

use crate::domain::{
    error::RepositoryError,
    models::{
        email::Email,
        user::{PublicId, User},
    },
    repositories::user_repository::UserRepository,
};
use crate::infrastructure::entities::users;

// PostgreSQL unique_violation
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PostgresUserRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Arc::new(db) }
    }

    async fn find_one(&self, column: users::Column, value: sea_orm::Value) -> Result<Option<User>, RepositoryError> {
        let model = users::Entity::find()
            .filter(column.eq(value))
            .one(self.db.as_ref())
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        model.map(into_domain).transpose()
    }
}

fn into_domain(model: users::Model) -> Result<User, RepositoryError> {
    let email = Email::new(&model.email).map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

    User::reconstruct(
        PublicId::from_uuid(model.public_id),
        model.firebase_uid,
        email,
        model.created_at,
        model.updated_at,
        model.deleted_at,
    )
    .map_err(|e| RepositoryError::DatabaseError(e.to_string()))
}

fn map_insert_error(err: DbErr) -> RepositoryError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return RepositoryError::Duplicate(detail);
    }

    match &err {
        DbErr::Exec(RuntimeErr::SqlxError(sqlx_err)) | DbErr::Query(RuntimeErr::SqlxError(sqlx_err)) => {
            match sqlx_err.as_database_error() {
                Some(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                    RepositoryError::Duplicate(db_err.message().to_string())
                }
                _ => RepositoryError::DatabaseError(err.to_string()),
            }
        }
        _ => RepositoryError::DatabaseError(err.to_string()),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        let user_model = users::ActiveModel {
            id: NotSet,
            public_id: Set(*user.public_id().as_uuid()),
            firebase_uid: Set(user.firebase_uid().to_string()),
            email: Set(user.email().as_str().to_string()),
            created_at: Set(user.created_at()),
            updated_at: Set(user.updated_at()),
            deleted_at: Set(user.deleted_at()),
        };

        users::Entity::insert(user_model)
            .exec_without_returning(self.db.as_ref())
            .await
            .map_err(map_insert_error)?;

        tracing::debug!(public_id = %user.public_id(), "user row inserted");
        Ok(())
    }

    async fn find_by_public_id(&self, public_id: &PublicId) -> Result<Option<User>, RepositoryError> {
        self.find_one(users::Column::PublicId, (*public_id.as_uuid()).into())
            .await
    }

    async fn find_by_firebase_uid(&self, firebase_uid: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one(users::Column::FirebaseUid, firebase_uid.into())
            .await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        self.find_one(users::Column::Email, email.as_str().into())
            .await
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
