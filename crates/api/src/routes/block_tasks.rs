//! Route definitions for the `/block-tasks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::block_tasks;
use crate::state::AppState;

/// Block task routes mounted at `/block-tasks`.
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
        .route("/", get(block_tasks::list).post(block_tasks::create))
        .route(
            "/{id}",
            get(block_tasks::get_by_id)
                .put(block_tasks::update)
                .patch(block_tasks::update)
                .delete(block_tasks::delete),
        )
}
