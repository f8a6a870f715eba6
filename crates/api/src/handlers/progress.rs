//! Handlers for the `/student-task-progress` resource.
//!
//! Progress reads embed a read-only snapshot of the referenced block task
//! under `task_detail`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use studyhub_core::error::CoreError;
use studyhub_core::types::DbId;
use studyhub_db::models::progress::{
    CreateProgress, ProgressListParams, ProgressWithTask, UpdateProgress,
};
use studyhub_db::repositories::ProgressRepo;

use crate::error::{AppError, AppResult};
use crate::response::Paginated;
use crate::state::AppState;

/// POST /api/v1/student-task-progress
///
/// One row per `(student, task)` pair; a duplicate pair is a conflict.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProgress>,
) -> AppResult<(StatusCode, Json<ProgressWithTask>)> {
    let progress = ProgressRepo::create(&state.pool, &input).await?;

    tracing::info!(
        progress_id = progress.progress.id,
        student_id = progress.progress.student,
        task_id = progress.progress.task,
        "Progress record created"
    );

    Ok((StatusCode::CREATED, Json(progress)))
}

/// GET /api/v1/student-task-progress
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProgressListParams>,
) -> AppResult<Json<Paginated<ProgressWithTask>>> {
    let page = ProgressRepo::list(&state.pool, &params).await?;
    Ok(Json(page.into()))
}

/// GET /api/v1/student-task-progress/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProgressWithTask>> {
    let progress = ProgressRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StudentTaskProgress",
            id,
        }))?;
    Ok(Json(progress))
}

/// PUT/PATCH /api/v1/student-task-progress/{id}
///
/// The `(student, task)` pair is immutable; only status, timestamps, and
/// notes can change.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProgress>,
) -> AppResult<Json<ProgressWithTask>> {
    let progress = ProgressRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StudentTaskProgress",
            id,
        }))?;
    Ok(Json(progress))
}

/// DELETE /api/v1/student-task-progress/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = ProgressRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "StudentTaskProgress",
            id,
        }));
    }
    tracing::info!(progress_id = id, "Progress record deleted");
    Ok(StatusCode::NO_CONTENT)
}
