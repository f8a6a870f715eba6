//! Handlers for the `/topics` resource.
//!
//! Topic reads embed the full block tree: every response carries `blocks`,
//! each with its `tasks`, so clients can render a whole curriculum from a
//! single request.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use studyhub_core::error::CoreError;
use studyhub_core::types::DbId;
use studyhub_db::models::topic::{CreateTopic, TopicListParams, TopicWithBlocks, UpdateTopic};
use studyhub_db::repositories::TopicRepo;

use crate::error::{AppError, AppResult};
use crate::response::Paginated;
use crate::state::AppState;

/// POST /api/v1/topics
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTopic>,
) -> AppResult<(StatusCode, Json<TopicWithBlocks>)> {
    let topic = TopicRepo::create(&state.pool, &input).await?;

    tracing::info!(topic_id = topic.topic.id, name = %topic.topic.name, "Topic created");

    Ok((StatusCode::CREATED, Json(topic)))
}

/// GET /api/v1/topics
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TopicListParams>,
) -> AppResult<Json<Paginated<TopicWithBlocks>>> {
    let page = TopicRepo::list(&state.pool, &params).await?;
    Ok(Json(page.into()))
}

/// GET /api/v1/topics/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TopicWithBlocks>> {
    let topic = TopicRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StudyTopic",
            id,
        }))?;
    Ok(Json(topic))
}

/// PUT/PATCH /api/v1/topics/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTopic>,
) -> AppResult<Json<TopicWithBlocks>> {
    let topic = TopicRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StudyTopic",
            id,
        }))?;
    Ok(Json(topic))
}

/// DELETE /api/v1/topics/{id}
///
/// Removes the topic's blocks, their tasks, and any progress on those tasks.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = TopicRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "StudyTopic",
            id,
        }));
    }
    tracing::info!(topic_id = id, "Topic deleted");
    Ok(StatusCode::NO_CONTENT)
}
