//! Tag and task-tag join models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studyhub_core::types::{DbId, Timestamp};

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `task_tags` junction table. `(task, tag)` is unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TaskTag {
    pub id: DbId,
    #[sqlx(rename = "task_id")]
    pub task: DbId,
    #[sqlx(rename = "tag_id")]
    pub tag: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a tag.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTag {
    pub name: String,
}

/// DTO for updating a tag.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTag {
    pub name: Option<String>,
}

/// DTO for applying a tag to a task via `POST /tasks/{id}/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyTag {
    pub tag: DbId,
}

/// Query parameters for `GET /api/v1/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagListParams {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
