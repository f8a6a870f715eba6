//! Handlers for the `/tags` resource.
//!
//! Task-tag association endpoints live in [`crate::handlers::tasks`] since
//! they are routed under `/tasks/{task_id}/tags`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use studyhub_core::error::CoreError;
use studyhub_core::types::DbId;
use studyhub_db::models::tag::{CreateTag, Tag, TagListParams, UpdateTag};
use studyhub_db::repositories::TagRepo;

use crate::error::{AppError, AppResult};
use crate::response::Paginated;
use crate::state::AppState;

/// POST /api/v1/tags
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<(StatusCode, Json<Tag>)> {
    let tag = TagRepo::create(&state.pool, &input).await?;

    tracing::info!(tag_id = tag.id, name = %tag.name, "Tag created");

    Ok((StatusCode::CREATED, Json(tag)))
}

/// GET /api/v1/tags
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TagListParams>,
) -> AppResult<Json<Paginated<Tag>>> {
    let page = TagRepo::list(&state.pool, &params).await?;
    Ok(Json(page.into()))
}

/// GET /api/v1/tags/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Tag>> {
    let tag = TagRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tag", id }))?;
    Ok(Json(tag))
}

/// PUT/PATCH /api/v1/tags/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTag>,
) -> AppResult<Json<Tag>> {
    let tag = TagRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tag", id }))?;
    Ok(Json(tag))
}

/// DELETE /api/v1/tags/{id}
///
/// Removes the tag's task associations with it.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = TagRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Tag", id }));
    }
    tracing::info!(tag_id = id, "Tag deleted");
    Ok(StatusCode::NO_CONTENT)
}
