//! Runtime configuration read from the environment (and `.env`).

use thiserror::Error;

pub const MIN_JWT_SECRET_LENGTH: usize = 32;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

const POSTGRES_VARS: [&str; 5] = [
    "POSTGRES_USER",
    "POSTGRES_PASSWORD",
    "POSTGRES_HOST",
    "POSTGRES_PORT",
    "POSTGRES_DB",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("JWT_SECRET must be at least {MIN_JWT_SECRET_LENGTH} bytes")]
    WeakJwtSecret,

    #[error("PORT is not a valid port number: {0}")]
    InvalidPort(String),
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("no .env file loaded: {}", e);
        }
        Self::from_lookup(|key| dotenvy::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => create_dsn(&lookup)?,
        };

        let jwt_secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing(vec!["JWT_SECRET"]))?;
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::WeakJwtSecret);
        }

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("PORT") {
            Some(port) => port.parse().map_err(|_| ConfigError::InvalidPort(port))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            host,
            port,
        })
    }
}

/// Build a Postgres DSN from the individual `POSTGRES_*` variables.
pub fn create_dsn<F>(lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let values: Vec<Option<String>> = POSTGRES_VARS
        .iter()
        .map(|key| lookup(key).filter(|value| !value.is_empty()))
        .collect();

    let missing: Vec<&'static str> = POSTGRES_VARS
        .iter()
        .zip(&values)
        .filter(|(_, value)| value.is_none())
        .map(|(key, _)| *key)
        .collect();
    if !missing.is_empty() {
        return Err(ConfigError::Missing(missing));
    }

    let [user, password, host, port, db] = <[Option<String>; 5]>::try_from(values)
        .map_err(|_| ConfigError::Missing(POSTGRES_VARS.to_vec()))?
        .map(Option::unwrap_or_default);

    Ok(format!(
        "postgres://{user}:{password}@{host}:{port}/{db}?sslmode=disable"
    ))
}
