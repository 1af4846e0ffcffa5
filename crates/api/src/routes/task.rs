//! Route definitions for the flat `/tasks` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// POST   /               -> create
/// GET    /{id}           -> get_by_id
/// PATCH  /{id}           -> update
/// DELETE /{id}           -> delete
/// PATCH  /{id}/status    -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(task::create))
        .route(
            "/{id}",
            get(task::get_by_id)
                .patch(task::update)
                .delete(task::delete),
        )
        .route("/{id}/status", patch(task::update_status))
}
