//! Student task progress model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studyhub_core::types::{DbId, Timestamp};

use crate::models::block_task::BlockTask;
use crate::models::patch::Patch;

/// Progress state of a student on a task, stored as the Postgres
/// `progress_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "progress_status", rename_all = "snake_case")]
pub enum ProgressStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

/// A row from the `student_task_progress` table.
///
/// `(student, task)` is unique: one progress row per student per task.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentTaskProgress {
    pub id: DbId,
    #[sqlx(rename = "student_id")]
    pub student: DbId,
    #[sqlx(rename = "task_id")]
    pub task: DbId,
    pub status: ProgressStatus,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Read projection: a progress row with a read-only snapshot of its task.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressWithTask {
    #[serde(flatten)]
    pub progress: StudentTaskProgress,
    pub task_detail: BlockTask,
}

/// DTO for creating a progress record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProgress {
    pub student: DbId,
    pub task: DbId,
    /// Defaults to `pending` if omitted.
    pub status: Option<ProgressStatus>,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub notes: Option<String>,
}

/// DTO for updating a progress record. All fields are optional; the
/// timestamps take [`Patch`] so an explicit `null` resets them, e.g. when
/// reopening a completed task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProgress {
    pub status: Option<ProgressStatus>,
    #[serde(default)]
    pub started_at: Patch<Timestamp>,
    #[serde(default)]
    pub completed_at: Patch<Timestamp>,
    pub notes: Option<String>,
}

/// Query parameters for `GET /api/v1/student-task-progress`.
///
/// `block` and `topic` filter through the referenced task, matching the
/// original API's task__block and task__block__topic filters.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressListParams {
    pub student: Option<DbId>,
    pub task: Option<DbId>,
    pub status: Option<ProgressStatus>,
    pub block: Option<DbId>,
    pub topic: Option<DbId>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
