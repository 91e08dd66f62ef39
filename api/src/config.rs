use std::{fmt, path::PathBuf};

use crate::{auth::TokenIssuer, error::AppError};

const DEFAULT_DATABASE_URL: &str = "sqlite://products.db";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const MIN_SECRET_LEN: usize = 32;

/// Token signing material, fixed for the life of the process.
#[derive(Clone)]
pub enum JwtKey {
    Secret(String),
    Ed25519 {
        private_key_path: PathBuf,
        public_key_path: PathBuf,
    },
}

impl fmt::Debug for JwtKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JwtKey::Secret(_) => f.write_str("Secret([REDACTED])"),
            JwtKey::Ed25519 {
                private_key_path,
                public_key_path,
            } => f
                .debug_struct("Ed25519")
                .field("private_key_path", private_key_path)
                .field("public_key_path", public_key_path)
                .finish(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub jwt_key: JwtKey,
}

impl AppConfig {
    /// Reads the process environment. `main` loads `.env` beforehand.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(get_env: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            get_env("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let bind_addr = get_env("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let max_connections = match get_env("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse::<u32>().map_err(|e| {
                AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e))
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let jwt_key = match (
            get_env("JWT_PRIVATE_KEY_PATH"),
            get_env("JWT_PUBLIC_KEY_PATH"),
            get_env("JWT_SECRET"),
        ) {
            (Some(private_key_path), Some(public_key_path), _) => JwtKey::Ed25519 {
                private_key_path: private_key_path.into(),
                public_key_path: public_key_path.into(),
            },
            (Some(_), None, _) | (None, Some(_), _) => {
                return Err(AppError::Config(
                    "JWT_PRIVATE_KEY_PATH and JWT_PUBLIC_KEY_PATH must be set together".to_string(),
                ))
            }
            (None, None, Some(secret)) if !secret.is_empty() => {
                if secret.len() < MIN_SECRET_LEN {
                    tracing::warn!(
                        "JWT_SECRET is shorter than {} bytes; use a longer random secret",
                        MIN_SECRET_LEN
                    );
                }
                JwtKey::Secret(secret)
            }
            (None, None, _) => {
                return Err(AppError::Config(
                    "JWT_SECRET (or JWT_PRIVATE_KEY_PATH and JWT_PUBLIC_KEY_PATH) must be set"
                        .to_string(),
                ))
            }
        };

        tracing::info!("Application configuration loaded.");
        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            jwt_key,
        })
    }

    pub fn token_issuer(&self) -> Result<TokenIssuer, AppError> {
        match &self.jwt_key {
            JwtKey::Secret(secret) => Ok(TokenIssuer::hs256(secret.as_bytes())),
            JwtKey::Ed25519 {
                private_key_path,
                public_key_path,
            } => {
                let read = |path: &PathBuf| {
                    std::fs::read(path).map_err(|e| {
                        AppError::Config(format!("Cannot read key {}: {}", path.display(), e))
                    })
                };
                TokenIssuer::ed25519_pem(&read(private_key_path)?, &read(public_key_path)?)
            }
        }
    }
}
