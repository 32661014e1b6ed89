//! Route definitions for CSV imports.

use axum::routing::post;
use axum::Router;

use crate::handlers::imports;
use crate::state::AppState;

/// Routes mounted at `/imports`.
///
/// ```text
/// POST /assets     -> import_assets (multipart CSV)
/// POST /locations  -> import_locations (multipart CSV)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assets", post(imports::import_assets))
        .route("/locations", post(imports::import_locations))
}
