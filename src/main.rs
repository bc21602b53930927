mod config;
mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    config::AppConfig,
    domain::{
        repositories::{identity_provider::IdentityProvider, user_repository::UserRepository},
        services::token_service::TokenIssuer,
    },
    infrastructure::{
        argon2_password_hasher::Argon2PasswordHasher,
        database,
        in_memory_identity_provider::InMemoryIdentityProvider,
        jwt_token_issuer::JwtTokenIssuer,
        user_repository::PostgresUserRepository,
    },
    presentation::handlers::user_handler::create_user_router,
    usecase::{current_user_usecase::CurrentUserUsecase, register_user_usecase::RegisterUserUsecase},
};

fn build_app<I, R, T>(
    register_user_usecase: RegisterUserUsecase<I, R, T>,
    current_user_usecase: CurrentUserUsecase<R, T>,
) -> Router
where
    I: IdentityProvider + Send + Sync + 'static,
    R: UserRepository + Send + Sync + 'static,
    T: TokenIssuer + 'static,
{
    Router::new()
        .route("/", get(|| async { "ok" }))
        .nest(
            "/api",
            create_user_router(register_user_usecase, current_user_usecase),
        )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "sleeve=info,sea_orm=warn".to_string());
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let config = AppConfig::from_env()?;

    let db = database::connect(&config.database_url).await?;
    database::create_schema(&db).await?;

    let user_repository = PostgresUserRepository::new(db);
    let token_issuer = JwtTokenIssuer::new(&config.jwt_secret);
    tracing::warn!("using the in-memory identity provider; accounts are lost on restart");
    let identity_provider = InMemoryIdentityProvider::new(Argon2PasswordHasher::new());

    let register_user_usecase = RegisterUserUsecase::new(
        identity_provider,
        user_repository.clone(),
        token_issuer.clone(),
    );
    let current_user_usecase = CurrentUserUsecase::new(user_repository, token_issuer);

    let app = build_app(register_user_usecase, current_user_usecase);

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
