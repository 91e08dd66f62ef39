use serde::{Deserialize, Serialize};

/// Row in the `users` table.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(rename = "firstName")]
    #[sqlx(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    #[sqlx(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    #[serde(skip)]
    pub hashed_password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Form body of `POST /auth/token`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// The caller on whose behalf a protected request runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub username: String,
}
