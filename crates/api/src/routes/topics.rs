//! Route definitions for the `/topics` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::topics;
use crate::state::AppState;

/// Topic routes mounted at `/topics`.
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
        .route("/", get(topics::list).post(topics::create))
        .route(
            "/{id}",
            get(topics::get_by_id)
                .put(topics::update)
                .patch(topics::update)
                .delete(topics::delete),
        )
}
