//! Handlers for the `/block-tasks` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use studyhub_core::error::CoreError;
use studyhub_core::types::DbId;
use studyhub_db::models::block_task::{
    BlockTask, BlockTaskListParams, CreateBlockTask, UpdateBlockTask,
};
use studyhub_db::repositories::BlockTaskRepo;

use crate::error::{AppError, AppResult};
use crate::response::Paginated;
use crate::state::AppState;

/// POST /api/v1/block-tasks
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBlockTask>,
) -> AppResult<(StatusCode, Json<BlockTask>)> {
    let task = BlockTaskRepo::create(&state.pool, &input).await?;

    tracing::info!(
        block_task_id = task.id,
        block_id = task.block,
        order = task.order,
        "Block task created"
    );

    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/block-tasks
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BlockTaskListParams>,
) -> AppResult<Json<Paginated<BlockTask>>> {
    let page = BlockTaskRepo::list(&state.pool, &params).await?;
    Ok(Json(page.into()))
}

/// GET /api/v1/block-tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<BlockTask>> {
    let task = BlockTaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlockTask",
            id,
        }))?;
    Ok(Json(task))
}

/// PUT/PATCH /api/v1/block-tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBlockTask>,
) -> AppResult<Json<BlockTask>> {
    let task = BlockTaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlockTask",
            id,
        }))?;
    Ok(Json(task))
}

/// DELETE /api/v1/block-tasks/{id}
///
/// Removes any progress rows recorded against the task.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = BlockTaskRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "BlockTask",
            id,
        }));
    }
    tracing::info!(block_task_id = id, "Block task deleted");
    Ok(StatusCode::NO_CONTENT)
}
