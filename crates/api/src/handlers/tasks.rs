//! Handlers for the `/tasks` resource and its `/tasks/{task_id}/tags`
//! sub-resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use studyhub_core::error::CoreError;
use studyhub_core::types::DbId;
use studyhub_db::models::tag::{ApplyTag, Tag, TaskTag};
use studyhub_db::models::task::{CreateTask, Task, TaskListParams, UpdateTask};
use studyhub_db::repositories::{TagRepo, TaskRepo};

use crate::error::{AppError, AppResult};
use crate::response::Paginated;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Task CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/tasks
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let task = TaskRepo::create(&state.pool, &input).await?;

    tracing::info!(task_id = task.id, created_by = task.created_by, "Task created");

    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/tasks
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TaskListParams>,
) -> AppResult<Json<Paginated<Task>>> {
    let page = TaskRepo::list(&state.pool, &params).await?;
    Ok(Json(page.into()))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// PUT/PATCH /api/v1/tasks/{id}
///
/// `created_by` is immutable; the update DTO has no such field.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    let task = TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Task", id }))?;
    Ok(Json(task))
}

/// DELETE /api/v1/tasks/{id}
///
/// Removes the task's tag associations with it.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = TaskRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Task", id }));
    }
    tracing::info!(task_id = id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Task-tag associations
// ---------------------------------------------------------------------------

/// GET /api/v1/tasks/{task_id}/tags
pub async fn list_tags(
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
) -> AppResult<Json<Vec<Tag>>> {
    ensure_task_exists(&state, task_id).await?;
    let tags = TagRepo::for_task(&state.pool, task_id).await?;
    Ok(Json(tags))
}

/// POST /api/v1/tasks/{task_id}/tags
///
/// Applying a tag the task already carries is a conflict.
pub async fn apply_tag(
    State(state): State<AppState>,
    Path(task_id): Path<DbId>,
    Json(input): Json<ApplyTag>,
) -> AppResult<(StatusCode, Json<TaskTag>)> {
    ensure_task_exists(&state, task_id).await?;
    let link = TagRepo::apply_to_task(&state.pool, task_id, input.tag).await?;

    tracing::info!(task_id, tag_id = input.tag, "Tag applied to task");

    Ok((StatusCode::CREATED, Json(link)))
}

/// DELETE /api/v1/tasks/{task_id}/tags/{tag_id}
pub async fn remove_tag(
    State(state): State<AppState>,
    Path((task_id, tag_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let removed = TagRepo::remove_from_task(&state.pool, task_id, tag_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "TaskTag",
            id: tag_id,
        }));
    }
    tracing::info!(task_id, tag_id, "Tag removed from task");
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_task_exists(state: &AppState, task_id: DbId) -> AppResult<()> {
    TaskRepo::find_by_id(&state.pool, task_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: task_id,
        }))?;
    Ok(())
}
