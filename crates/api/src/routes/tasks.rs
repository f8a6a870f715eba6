//! Route definitions for the `/tasks` resource, including the nested
//! task-tag association routes.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Task routes mounted at `/tasks`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// PATCH  /{id}                      -> update
/// DELETE /{id}                      -> delete
/// GET    /{task_id}/tags            -> list_tags
/// POST   /{task_id}/tags            -> apply_tag
/// DELETE /{task_id}/tags/{tag_id}   -> remove_tag
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list).post(tasks::create))
        .route(
            "/{id}",
            get(tasks::get_by_id)
                .put(tasks::update)
                .patch(tasks::update)
                .delete(tasks::delete),
        )
        .route(
            "/{task_id}/tags",
            get(tasks::list_tags).post(tasks::apply_tag),
        )
        .route("/{task_id}/tags/{tag_id}", delete(tasks::remove_tag))
}
