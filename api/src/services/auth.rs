//! Registration, login and bearer-token resolution.

use std::sync::Arc;

use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        password::{hash_password, verify_password},
        TokenIssuer,
    },
    error::AppError,
    models::user::{CreateUser, CurrentUser, TokenResponse, User},
    store::users::{self, NewUser},
};

#[derive(Clone)]
pub struct AuthService {
    db: SqlitePool,
    tokens: Arc<TokenIssuer>,
    // Verified against when the username is unknown, so both login failure
    // paths cost one Argon2 run.
    decoy_hash: Arc<str>,
}

impl AuthService {
    pub fn new(db: SqlitePool, tokens: TokenIssuer) -> Result<Self, AppError> {
        let decoy_hash = hash_password("decoy password never matches")?;
        Ok(Self {
            db,
            tokens: Arc::new(tokens),
            decoy_hash: decoy_hash.into(),
        })
    }

    #[instrument(
        name = "auth::register",
        skip(self, payload),
        fields(username = %payload.username)
    )]
    pub async fn register(&self, payload: CreateUser) -> Result<User, AppError> {
        let CreateUser {
            username,
            first_name,
            last_name,
            email,
            password,
        } = payload;

        let hashed_password =
            tokio::task::spawn_blocking(move || hash_password(&password)).await??;

        let new_user = NewUser {
            username: &username,
            first_name: &first_name,
            last_name: &last_name,
            email: &email,
            hashed_password: &hashed_password,
        };
        let user = users::insert(&self.db, &new_user).await.map_err(|e| {
            let is_unique = e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation());
            if is_unique {
                warn!("registration rejected: username or email taken");
                AppError::Conflict
            } else {
                AppError::Sqlx(e)
            }
        })?;

        info!(user_id = user.id, "user registered");
        Ok(user)
    }

    #[instrument(name = "auth::login", skip(self, password))]
    pub async fn login(&self, username: &str, password: String) -> Result<TokenResponse, AppError> {
        let user = users::find_by_username(&self.db, username).await?;

        let hashed_password = match &user {
            Some(user) => user.hashed_password.clone(),
            None => self.decoy_hash.to_string(),
        };
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &hashed_password))
                .await??;

        let user = match user {
            Some(user) if matches => user,
            _ => {
                warn!("login rejected");
                return Err(AppError::LoginFail);
            }
        };

        let access_token = self.tokens.issue(&user.username)?;
        info!("access token issued");
        Ok(TokenResponse::bearer(access_token))
    }

    /// Pure token check: no store access.
    pub fn resolve_current_user(&self, token: &str) -> Result<CurrentUser, AppError> {
        let claims = self.tokens.validate(token)?;
        Ok(CurrentUser {
            username: claims.sub,
        })
    }
}
