use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("password hash error: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),

    #[error("token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("validation error: {0}")]
    Validation(String),

    /// Username or email already taken. Deliberately does not say which.
    #[error("email or username already exists")]
    Conflict,

    /// Unknown user and wrong password collapse into this one variant.
    #[error("login failed")]
    LoginFail,

    /// Missing, malformed, tampered or expired bearer token.
    #[error("not authenticated")]
    Unauthenticated,

    #[error("product not found")]
    NotFound,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict => StatusCode::BAD_REQUEST,
            AppError::LoginFail | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Sqlx(_)
            | AppError::Migrate(_)
            | AppError::PasswordHash(_)
            | AppError::Jwt(_)
            | AppError::Join(_)
            | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Extractor rejections carry serde detail (field names, byte offsets). That
// goes to the debug log; the client gets a fixed message.

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "rejected JSON body");
        AppError::Validation("Invalid request body".to_string())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        tracing::debug!(%rejection, "rejected form body");
        AppError::Validation("Invalid form body".to_string())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(%rejection, "rejected path parameter");
        AppError::Validation("Invalid path parameter".to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(%rejection, "rejected query string");
        AppError::Validation("Invalid query parameters".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            AppError::Sqlx(e) => {
                tracing::error!("Database error: {}", e);
                "Database error".to_string()
            }
            AppError::Migrate(e) => {
                tracing::error!("Migration error: {}", e);
                "Database error".to_string()
            }
            AppError::PasswordHash(e) => {
                tracing::error!("Password hashing error: {}", e);
                "Password hashing error".to_string()
            }
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {}", e);
                "Token error".to_string()
            }
            AppError::Join(e) => {
                tracing::error!("Background task error: {}", e);
                "Internal server error".to_string()
            }
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::Validation(msg) => msg.clone(),
            AppError::Conflict => "Email or username already exists".to_string(),
            AppError::LoginFail => "Incorrect username or password".to_string(),
            AppError::Unauthenticated => "Could not validate credentials".to_string(),
            AppError::NotFound => "Product not found".to_string(),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
