//! Route definitions for the assignee directory.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assignees;
use crate::state::AppState;

/// Routes mounted at `/assignees`.
///
/// ```text
/// GET  /          -> list_assignees
/// POST /          -> create_assignee
/// POST /resolve   -> resolve_assignee (get-or-create by name)
/// GET  /{id}      -> get_assignee
/// PUT  /{id}      -> update_assignee
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(assignees::list_assignees).post(assignees::create_assignee),
        )
        .route("/resolve", post(assignees::resolve_assignee))
        .route(
            "/{id}",
            get(assignees::get_assignee).put(assignees::update_assignee),
        )
}
