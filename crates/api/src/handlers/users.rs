//! Handlers for the `/users` resource.
//!
//! Passwords are write-only: the create and update DTOs accept a plaintext
//! `password`, which is hashed with Argon2id before it reaches the database,
//! and user rows are always read without the hash column.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use studyhub_core::error::CoreError;
use studyhub_core::types::DbId;
use studyhub_db::models::user::{CreateUser, UpdateUser, User, UserDeletion, UserListParams};
use studyhub_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::response::Paginated;
use crate::state::AppState;

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    let password_hash = hash_submitted_password(input.password.as_deref())?;
    let user = UserRepo::create(&state.pool, &input, password_hash.as_deref()).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<UserListParams>,
) -> AppResult<Json<Paginated<User>>> {
    let page = UserRepo::list(&state.pool, &params).await?;
    Ok(Json(page.into()))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// PUT/PATCH /api/v1/users/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    let password_hash = hash_submitted_password(input.password.as_deref())?;
    let user = UserRepo::update(&state.pool, id, &input, password_hash.as_deref())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// DELETE /api/v1/users/{id}
///
/// Refused with 409 while any task still names the user as `created_by`.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    match UserRepo::delete(&state.pool, id).await? {
        UserDeletion::Deleted => {
            tracing::info!(user_id = id, "User deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        UserDeletion::NotFound => {
            Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
        }
        UserDeletion::Protected => Err(AppError::Core(CoreError::Conflict(
            "User cannot be deleted while tasks reference it as creator".into(),
        ))),
    }
}

fn hash_submitted_password(password: Option<&str>) -> Result<Option<String>, AppError> {
    password
        .map(|p| {
            hash_password(p)
                .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))
        })
        .transpose()
}
