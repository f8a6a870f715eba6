//! Route definitions for the `/student-task-progress` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::progress;
use crate::state::AppState;

/// Progress routes mounted at `/student-task-progress`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(progress::list).post(progress::create))
        .route(
            "/{id}",
            get(progress::get_by_id)
                .put(progress::update)
                .patch(progress::update)
                .delete(progress::delete),
        )
}
