pub mod health;
pub mod project;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /projects                       list, create
/// /projects/{id}                  get, update, delete
/// /projects/{project_id}/tasks    list, create
///
/// /tasks                          create
/// /tasks/{id}                     get, update, delete
/// /tasks/{id}/status              update status
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Project routes (also nest the project-scoped task list).
        .nest("/projects", project::router())
        // Flat task routes addressed by task id.
        .nest("/tasks", task::router())
}
