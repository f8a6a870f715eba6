//! Handlers for the `/students` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use studyhub_core::error::CoreError;
use studyhub_core::types::DbId;
use studyhub_db::models::student::{CreateStudent, Student, StudentListParams, UpdateStudent};
use studyhub_db::repositories::StudentRepo;

use crate::error::{AppError, AppResult};
use crate::response::Paginated;
use crate::state::AppState;

/// POST /api/v1/students
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateStudent>,
) -> AppResult<(StatusCode, Json<Student>)> {
    let student = StudentRepo::create(&state.pool, &input).await?;

    tracing::info!(student_id = student.id, user_id = student.user, "Student profile created");

    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /api/v1/students
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<StudentListParams>,
) -> AppResult<Json<Paginated<Student>>> {
    let page = StudentRepo::list(&state.pool, &params).await?;
    Ok(Json(page.into()))
}

/// GET /api/v1/students/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Student>> {
    let student = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;
    Ok(Json(student))
}

/// PUT/PATCH /api/v1/students/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStudent>,
) -> AppResult<Json<Student>> {
    let student = StudentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;
    Ok(Json(student))
}

/// DELETE /api/v1/students/{id}
///
/// Removes the student's progress rows with the profile.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = StudentRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }));
    }
    tracing::info!(student_id = id, "Student profile deleted");
    Ok(StatusCode::NO_CONTENT)
}
