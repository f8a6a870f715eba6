//! Study block model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studyhub_core::types::{DbId, Timestamp};

use crate::models::block_task::BlockTask;

/// A row from the `study_blocks` table. Blocks are numbered within a topic;
/// `(topic, number)` is unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudyBlock {
    pub id: DbId,
    #[sqlx(rename = "topic_id")]
    pub topic: DbId,
    pub number: i32,
    pub title: String,
    pub description: String,
    pub estimated_minutes: i32,
    pub is_published: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Read projection: a block with its tasks embedded, ordered by `order`.
#[derive(Debug, Clone, Serialize)]
pub struct BlockWithTasks {
    #[serde(flatten)]
    pub block: StudyBlock,
    pub tasks: Vec<BlockTask>,
}

/// DTO for creating a block.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlock {
    pub topic: DbId,
    pub number: i32,
    pub title: String,
    pub description: Option<String>,
    pub estimated_minutes: Option<i32>,
    /// Defaults to `false` if omitted.
    pub is_published: Option<bool>,
}

/// DTO for updating a block. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBlock {
    pub topic: Option<DbId>,
    pub number: Option<i32>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_minutes: Option<i32>,
    pub is_published: Option<bool>,
}

/// Query parameters for `GET /api/v1/blocks`.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockListParams {
    pub topic: Option<DbId>,
    pub is_published: Option<bool>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
