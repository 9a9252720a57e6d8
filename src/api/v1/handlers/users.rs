/*
 * Responsibility
 * - /users 系 handler
 * - POST /users は登録なので Validator だけ (token 発行・login は扱わない)
 * - GET / DELETE /users/{userId} は所有者本人のみ (Pipeline)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::users::{CREATE_USER_RULES, CreateUserRequest, USER_RULES, UserResponse},
        extractors::RequestContext,
    },
    error::AppError,
    repos::RepoError,
    services::{password::hash_password, validation::ParameterValidator},
    state::AppState,
};

const CREATE_USER: ParameterValidator = ParameterValidator::new(CREATE_USER_RULES);

fn user_not_found(user_id: &str) -> AppError {
    AppError::NotFound(format!("User with id \"{user_id}\" not found").into())
}

pub async fn create_user(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    CREATE_USER.validate(&ctx)?;
    let CreateUserRequest { email, password } = ctx.body_as()?;

    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(AppError::internal)?
        .map_err(AppError::internal)?;

    let row = state
        .users
        .create(&email, &password_hash)
        .await
        .map_err(|e| match e {
            RepoError::Conflict => AppError::conflict("User already exists"),
            other => other.into(),
        })?;

    tracing::info!(user_id = %row.id, created_at = %row.created_at, "user created");
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_user(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<UserResponse>, AppError> {
    let users = &state.users;

    state
        .pipeline(USER_RULES)
        .run(ctx, |req| async move {
            let row = users
                .get(req.owner_id())
                .await?
                .ok_or_else(|| user_not_found(req.owner_id()))?;
            Ok(Json(UserResponse::from(row)))
        })
        .await
}

pub async fn delete_user(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<UserResponse>, AppError> {
    let users = &state.users;

    state
        .pipeline(USER_RULES)
        .run(ctx, |req| async move {
            let row = users
                .delete(req.owner_id())
                .await?
                .ok_or_else(|| user_not_found(req.owner_id()))?;
            tracing::info!(user_id = %row.id, "user deleted");
            Ok(Json(UserResponse::from(row)))
        })
        .await
}
