//! User account model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use studyhub_core::types::{DbId, Timestamp};

/// A row from the `users` table.
///
/// `password_hash` is deliberately absent: user queries never select it, so
/// the hash cannot leak into a response.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub date_joined: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
///
/// `password` is write-only: the handler hashes it with Argon2id and only the
/// hash reaches the repository.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
}

/// Query parameters for `GET /api/v1/users`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserListParams {
    pub is_active: Option<bool>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Outcome of a user delete.
///
/// Deleting a user nulls `assigned_to` references but is refused outright
/// while any task still names the user as `created_by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDeletion {
    Deleted,
    NotFound,
    /// Still referenced as `created_by` by at least one task.
    Protected,
}
