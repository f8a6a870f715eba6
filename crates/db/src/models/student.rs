//! Student profile model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studyhub_core::types::{DbId, Timestamp};

/// A row from the `students` table. One profile per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: DbId,
    #[sqlx(rename = "user_id")]
    pub user: DbId,
    pub full_name: String,
    /// Server-assigned enrollment date.
    pub started_at: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a student profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudent {
    pub user: DbId,
    pub full_name: String,
}

/// DTO for updating a student profile. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStudent {
    pub user: Option<DbId>,
    pub full_name: Option<String>,
}

/// Query parameters for `GET /api/v1/students`.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentListParams {
    pub user: Option<DbId>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
