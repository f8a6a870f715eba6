//! Handlers for the `/blocks` resource. Block reads embed their tasks.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use studyhub_core::error::CoreError;
use studyhub_core::types::DbId;
use studyhub_db::models::block::{BlockListParams, BlockWithTasks, CreateBlock, UpdateBlock};
use studyhub_db::repositories::BlockRepo;

use crate::error::{AppError, AppResult};
use crate::response::Paginated;
use crate::state::AppState;

/// POST /api/v1/blocks
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateBlock>,
) -> AppResult<(StatusCode, Json<BlockWithTasks>)> {
    let block = BlockRepo::create(&state.pool, &input).await?;

    tracing::info!(
        block_id = block.block.id,
        topic_id = block.block.topic,
        number = block.block.number,
        "Block created"
    );

    Ok((StatusCode::CREATED, Json(block)))
}

/// GET /api/v1/blocks
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BlockListParams>,
) -> AppResult<Json<Paginated<BlockWithTasks>>> {
    let page = BlockRepo::list(&state.pool, &params).await?;
    Ok(Json(page.into()))
}

/// GET /api/v1/blocks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<BlockWithTasks>> {
    let block = BlockRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StudyBlock",
            id,
        }))?;
    Ok(Json(block))
}

/// PUT/PATCH /api/v1/blocks/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBlock>,
) -> AppResult<Json<BlockWithTasks>> {
    let block = BlockRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StudyBlock",
            id,
        }))?;
    Ok(Json(block))
}

/// DELETE /api/v1/blocks/{id}
///
/// Removes the block's tasks and any progress on those tasks.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = BlockRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "StudyBlock",
            id,
        }));
    }
    tracing::info!(block_id = id, "Block deleted");
    Ok(StatusCode::NO_CONTENT)
}
