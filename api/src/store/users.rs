use sqlx::{Executor, Sqlite};

use crate::models::user::User;

pub struct NewUser<'a> {
    pub username: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub hashed_password: &'a str,
}

/// Single insert; the UNIQUE constraints on `username` and `email` are what
/// reject duplicates.
pub async fn insert<'e, E>(executor: E, user: &NewUser<'_>) -> Result<User, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, User>(
        "INSERT INTO users (username, firstName, lastName, email, hashed_password) \
         VALUES (?, ?, ?, ?, ?) \
         RETURNING id, username, firstName, lastName, email, hashed_password",
    )
    .bind(user.username)
    .bind(user.first_name)
    .bind(user.last_name)
    .bind(user.email)
    .bind(user.hashed_password)
    .fetch_one(executor)
    .await
}

pub async fn find_by_username<'e, E>(
    executor: E,
    username: &str,
) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, User>(
        "SELECT id, username, firstName, lastName, email, hashed_password \
         FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(executor)
    .await
}
