//! Block task model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studyhub_core::types::{DbId, Timestamp};

/// Availability of a block task, stored as the Postgres `block_task_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "block_task_status", rename_all = "snake_case")]
pub enum BlockTaskStatus {
    #[default]
    Available,
    Archived,
}

/// A row from the `block_tasks` table.
///
/// The API field `order` maps to the `sort_order` column (`order` is an SQL
/// keyword). `(block, order)` is unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlockTask {
    pub id: DbId,
    #[sqlx(rename = "block_id")]
    pub block: DbId,
    pub title: String,
    pub instructions: String,
    /// Free-form structured payload (links, files, embeds).
    pub resources: serde_json::Value,
    pub estimated_minutes: i32,
    #[sqlx(rename = "sort_order")]
    pub order: i32,
    pub status: BlockTaskStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a block task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBlockTask {
    pub block: DbId,
    pub title: String,
    pub instructions: Option<String>,
    pub resources: Option<serde_json::Value>,
    pub estimated_minutes: Option<i32>,
    pub order: i32,
    /// Defaults to `available` if omitted.
    pub status: Option<BlockTaskStatus>,
}

/// DTO for updating a block task. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBlockTask {
    pub block: Option<DbId>,
    pub title: Option<String>,
    pub instructions: Option<String>,
    pub resources: Option<serde_json::Value>,
    pub estimated_minutes: Option<i32>,
    pub order: Option<i32>,
    pub status: Option<BlockTaskStatus>,
}

/// Query parameters for `GET /api/v1/block-tasks`.
///
/// `topic` filters through the parent block, matching the original API's
/// block__topic filter.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockTaskListParams {
    pub block: Option<DbId>,
    pub status: Option<BlockTaskStatus>,
    pub topic: Option<DbId>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
