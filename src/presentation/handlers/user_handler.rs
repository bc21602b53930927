use std::sync::Arc;

use crate::{
    domain::{
        error::{DomainError, ErrorKind},
        models::user::User,
        repositories::{identity_provider::IdentityProvider, user_repository::UserRepository},
        services::token_service::{TokenIssuer, TokenPair},
    },
    usecase::{current_user_usecase::CurrentUserUsecase, register_user_usecase::RegisterUserUsecase},
};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

// Request

/// json for register request
#[derive(Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

// Response

/// json for register response
#[derive(Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: UserBody,
    pub tokens: TokensBody,
}

#[derive(Serialize, Deserialize)]
pub struct UserBody {
    pub id: String,
    pub email: String,
}

impl From<User> for UserBody {
    fn from(user: User) -> Self {
        Self {
            id: user.public_id().to_string(),
            email: user.email().to_string(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokensBody {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for TokensBody {
    fn from(tokens: TokenPair) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}

/// json for every error response
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Error body plus status. Only the `Display` of the failure is sent back.
struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    fn unauthorized(message: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "UNAUTHORIZED",
            message: message.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            code: "INVALID_REQUEST",
            message: rejection.body_text(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let kind = err.kind();
        let status = match kind {
            ErrorKind::InvalidEmail | ErrorKind::WeakPassword => StatusCode::BAD_REQUEST,
            ErrorKind::DuplicateEmail => StatusCode::CONFLICT,
            ErrorKind::UserNotFound => StatusCode::NOT_FOUND,
            ErrorKind::IdentityProviderFailure
            | ErrorKind::DatabaseFailure
            | ErrorKind::TokenGenerationFailure => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = ?err, kind = %kind, "request failed");
        }

        Self {
            status,
            code: kind.code(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            code: self.code.to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/* Router Function and Handler Function */

/// function return Router object
/// Suppose to be nested by main router
pub fn create_user_router<
    I: IdentityProvider + Send + Sync + 'static,
    R: UserRepository + Send + Sync + 'static,
    T: TokenIssuer + 'static,
>(
    register_service: RegisterUserUsecase<I, R, T>,
    current_user_service: CurrentUserUsecase<R, T>,
) -> Router {
    let state = AppState {
        register_service: Arc::new(register_service),
        current_user_service: Arc::new(current_user_service),
    };

    Router::new()
        .route("/register", post(register::<I, R, T>))
        .route("/me", get(me::<I, R, T>))
        .with_state(state)
}

pub struct AppState<I: IdentityProvider, R: UserRepository, T: TokenIssuer> {
    pub register_service: Arc<RegisterUserUsecase<I, R, T>>,
    pub current_user_service: Arc<CurrentUserUsecase<R, T>>,
}

impl<I: IdentityProvider, R: UserRepository, T: TokenIssuer> Clone for AppState<I, R, T> {
    fn clone(&self) -> Self {
        Self {
            register_service: Arc::clone(&self.register_service),
            current_user_service: Arc::clone(&self.current_user_service),
        }
    }
}

// handler function

/// handler function for register
async fn register<
    I: IdentityProvider + Send + Sync,
    R: UserRepository + Send + Sync,
    T: TokenIssuer,
>(
    State(state): State<AppState<I, R, T>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return ApiError::from(rejection).into_response(),
    };

    match state
        .register_service
        .execute(&payload.email, &payload.password)
        .await
    {
        Ok(result) => {
            let response = RegisterResponse {
                user: result.user.into(),
                tokens: result.tokens.into(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// handler function for the caller's own user record
async fn me<I: IdentityProvider + Send + Sync, R: UserRepository + Send + Sync, T: TokenIssuer>(
    State(state): State<AppState<I, R, T>>,
    headers: HeaderMap,
) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return ApiError::unauthorized("Missing bearer token").into_response();
    };

    match state.current_user_service.execute(token).await {
        Ok(user) => (StatusCode::OK, Json(UserBody::from(user))).into_response(),
        Err(DomainError::TokenGenerationFailure(err)) => {
            tracing::debug!(error = %err, "access token rejected");
            ApiError::unauthorized("Invalid access token").into_response()
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}

/// helper function that extract the token from `Authorization: Bearer <token>`
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some("Bearer abc.def.ghi"), Some("abc.def.ghi"))]
    #[case(Some("Bearer   abc "), Some("abc"))]
    #[case(Some("Basic dXNlcjpwYXNz"), None)]
    #[case(Some("Bearer "), None)]
    #[case(None, None)]
    fn extracts_bearer_token(#[case] header_value: Option<&str>, #[case] expected: Option<&str>) {
        let mut headers = HeaderMap::new();
        if let Some(value) = header_value {
            headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        }

        assert_eq!(bearer_token(&headers), expected);
    }

    #[rstest]
    #[case(DomainError::UserNotFound, StatusCode::NOT_FOUND, "USER_NOT_FOUND")]
    #[case(
        DomainError::database("connection refused"),
        StatusCode::INTERNAL_SERVER_ERROR,
        "DATABASE_FAILURE"
    )]
    #[case(
        DomainError::duplicate_email("test@example.com", "unique violation"),
        StatusCode::CONFLICT,
        "DUPLICATE_EMAIL"
    )]
    fn maps_domain_errors(
        #[case] err: DomainError,
        #[case] status: StatusCode,
        #[case] code: &str,
    ) {
        let api_error = ApiError::from(err);

        assert_eq!(api_error.status, status);
        assert_eq!(api_error.code, code);
    }

    #[test]
    fn error_message_hides_cause() {
        let api_error = ApiError::from(DomainError::database("password authentication failed"));

        assert_eq!(api_error.message, "Database error");
    }
}
