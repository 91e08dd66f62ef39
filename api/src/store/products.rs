use sqlx::{Executor, Sqlite};

use crate::models::product::{Product, ProductData};

pub async fn list<'e, E>(executor: E, skip: i64, limit: i64) -> Result<Vec<Product>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Product>(
        "SELECT id, name, description, price FROM products ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(skip)
    .fetch_all(executor)
    .await
}

pub async fn find<'e, E>(executor: E, id: i64) -> Result<Option<Product>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Product>("SELECT id, name, description, price FROM products WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn insert<'e, E>(executor: E, data: &ProductData) -> Result<Product, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, description, price) VALUES (?, ?, ?) \
         RETURNING id, name, description, price",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .fetch_one(executor)
    .await
}

/// Overwrites exactly the mutable columns. `id` is never assigned.
pub async fn replace<'e, E>(
    executor: E,
    id: i64,
    data: &ProductData,
) -> Result<Option<Product>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Product>(
        "UPDATE products SET name = ?, description = ?, price = ? WHERE id = ? \
         RETURNING id, name, description, price",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, id: i64) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
