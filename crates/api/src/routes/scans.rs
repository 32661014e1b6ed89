//! Route definitions for browsing the scan event log.

use axum::routing::get;
use axum::Router;

use crate::handlers::scans;
use crate::state::AppState;

/// Routes mounted at `/scans`. Read-only.
///
/// ```text
/// GET /recent              -> recent (bounded, default 50)
/// GET /asset/{asset_id}    -> by_asset
/// GET /room/{room_id}      -> by_room
/// GET /status/{status}     -> by_status
/// GET /{scan_id}           -> get_scan
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recent", get(scans::recent))
        .route("/asset/{asset_id}", get(scans::by_asset))
        .route("/room/{room_id}", get(scans::by_room))
        .route("/status/{status}", get(scans::by_status))
        .route("/{scan_id}", get(scans::get_scan))
}
