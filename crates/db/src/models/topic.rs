//! Study topic model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studyhub_core::types::{DbId, Timestamp};

use crate::models::block::BlockWithTasks;

/// Topic difficulty level, stored as the Postgres `difficulty` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "difficulty", rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

/// A row from the `study_topics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudyTopic {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Read projection: a topic with its blocks (and their tasks) embedded.
#[derive(Debug, Clone, Serialize)]
pub struct TopicWithBlocks {
    #[serde(flatten)]
    pub topic: StudyTopic,
    pub blocks: Vec<BlockWithTasks>,
}

/// DTO for creating a topic.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTopic {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `beginner` if omitted.
    pub difficulty: Option<Difficulty>,
    /// Defaults to `true` if omitted.
    pub is_active: Option<bool>,
}

/// DTO for updating a topic. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTopic {
    pub name: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub is_active: Option<bool>,
}

/// Query parameters for `GET /api/v1/topics`.
#[derive(Debug, Clone, Deserialize)]
pub struct TopicListParams {
    pub difficulty: Option<Difficulty>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
