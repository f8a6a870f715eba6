pub mod block_tasks;
pub mod blocks;
pub mod health;
pub mod progress;
pub mod projects;
pub mod students;
pub mod tags;
pub mod tasks;
pub mod topics;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                              list, create
/// /users/{id}                         get, update, delete
///
/// /students                           list, create
/// /students/{id}                      get, update, delete
///
/// /student-task-progress              list, create
/// /student-task-progress/{id}         get, update, delete
///
/// /topics                             list, create
/// /topics/{id}                        get, update, delete
///
/// /blocks                             list, create
/// /blocks/{id}                        get, update, delete
///
/// /block-tasks                        list, create
/// /block-tasks/{id}                   get, update, delete
///
/// /tasks                              list, create
/// /tasks/{id}                         get, update, delete
/// /tasks/{task_id}/tags               list tags, apply tag
/// /tasks/{task_id}/tags/{tag_id}      remove tag
///
/// /projects                           list, create
/// /projects/{id}                      get, update, delete
///
/// /tags                               list, create
/// /tags/{id}                          get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/students", students::router())
        .nest("/student-task-progress", progress::router())
        .nest("/topics", topics::router())
        .nest("/blocks", blocks::router())
        .nest("/block-tasks", block_tasks::router())
        .nest("/tasks", tasks::router())
        .nest("/projects", projects::router())
        .nest("/tags", tags::router())
}
