//! Standalone task model and DTOs.
//!
//! This is the second, independently evolved task domain (tasks, projects,
//! tags), preserved alongside the study domain rather than merged with it.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studyhub_core::types::{DbId, Timestamp};

use crate::models::patch::Patch;

/// Lifecycle state of a task, stored as the Postgres `task_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Archived,
}

/// Priority of a task, stored as the Postgres `task_priority` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "task_priority", rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    /// Client-managed flag; the server does not enforce it.
    pub is_locked: bool,
    /// Legacy comma-separated labels, kept alongside the task_tags join.
    pub tags: String,
    #[sqlx(rename = "project_id")]
    pub project: Option<DbId>,
    pub created_by: DbId,
    pub assigned_to: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a task. `created_by` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub is_locked: Option<bool>,
    pub tags: Option<String>,
    pub project: Option<DbId>,
    pub created_by: DbId,
    pub assigned_to: Option<DbId>,
}

/// DTO for updating a task. All fields are optional; `created_by` is
/// immutable after creation. Nullable columns take [`Patch`] so an explicit
/// `null` clears them (unassigning a task, detaching it from a project).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub due_date: Patch<Timestamp>,
    #[serde(default)]
    pub completed_at: Patch<Timestamp>,
    pub is_locked: Option<bool>,
    pub tags: Option<String>,
    #[serde(default)]
    pub project: Patch<DbId>,
    #[serde(default)]
    pub assigned_to: Patch<DbId>,
}

/// Query parameters for `GET /api/v1/tasks`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskListParams {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<DbId>,
    pub created_by: Option<DbId>,
    pub project: Option<DbId>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
