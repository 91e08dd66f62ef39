use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::AppError,
    handlers::extract::{FormBody, JsonBody},
    models::user::{CreateUser, LoginForm, TokenResponse, User},
    AppState,
};

pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.auth.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    FormBody(form): FormBody<LoginForm>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = state.auth.login(&form.username, form.password).await?;
    Ok(Json(token))
}
