use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppError,
    handlers::extract::{JsonBody, PathParam, QueryParams},
    models::{
        product::{Pagination, Product, ProductData, ProductId},
        user::CurrentUser,
    },
    AppState,
};

// `CurrentUser` is extracted before the path and body, so a bad token is
// rejected before anything else is looked at.

pub async fn list(
    State(state): State<AppState>,
    QueryParams(page): QueryParams<Pagination>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.catalog.list(page).await?))
}

pub async fn get(
    user: CurrentUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Product>, AppError> {
    let id = ProductId::try_from(id)?;
    Ok(Json(state.catalog.get(&user, id).await?))
}

pub async fn create(
    user: CurrentUser,
    State(state): State<AppState>,
    JsonBody(data): JsonBody<ProductData>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = state.catalog.create(&user, data).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update(
    user: CurrentUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(data): JsonBody<ProductData>,
) -> Result<StatusCode, AppError> {
    let id = ProductId::try_from(id)?;
    state.catalog.update(&user, id, data).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    user: CurrentUser,
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, AppError> {
    let id = ProductId::try_from(id)?;
    state.catalog.delete(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
