//! Product catalog HTTP service with password registration and JWT bearer
//! authentication over SQLite.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod rest;
pub mod services;
pub mod store;

use sqlx::sqlite::SqlitePool;

use crate::{
    auth::TokenIssuer,
    error::AppError,
    services::{AuthService, CatalogService},
};

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(db: SqlitePool, tokens: TokenIssuer) -> Result<Self, AppError> {
        Ok(Self {
            auth: AuthService::new(db.clone(), tokens)?,
            catalog: CatalogService::new(db),
        })
    }
}
