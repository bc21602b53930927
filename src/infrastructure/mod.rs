pub mod argon2_password_hasher;
pub mod database;
pub mod entities;
pub mod in_memory_identity_provider;
pub mod jwt_token_issuer;
pub mod user_repository;
