//! Route definitions for the asset registry and its lifecycle actions.
//!
//! All routes are mounted under `/assets`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{assets, audit, discrepancy};
use crate::state::AppState;

/// Asset routes mounted at `/assets`.
///
/// ```text
/// GET    /                -> list_assets
/// POST   /                -> create_asset
/// GET    /discrepancies   -> list_discrepancies
/// POST   /mark-missing    -> mark_missing (audit sweep)
/// POST   /bulk-found      -> bulk_found
/// POST   /bulk-relocate   -> bulk_relocate
/// GET    /{id}            -> get_asset
/// PUT    /{id}            -> update_asset (descriptive fields only)
/// DELETE /{id}            -> delete_asset (blocked while history exists)
/// POST   /{id}/location   -> update_location
/// POST   /{id}/lost       -> mark_lost
/// POST   /{id}/found      -> mark_found
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assets::list_assets).post(assets::create_asset))
        .route("/discrepancies", get(assets::list_discrepancies))
        .route("/mark-missing", post(audit::mark_missing))
        .route("/bulk-found", post(discrepancy::bulk_found))
        .route("/bulk-relocate", post(discrepancy::bulk_relocate))
        .route(
            "/{id}",
            get(assets::get_asset)
                .put(assets::update_asset)
                .delete(assets::delete_asset),
        )
        .route("/{id}/location", post(audit::update_location))
        .route("/{id}/lost", post(discrepancy::mark_lost))
        .route("/{id}/found", post(discrepancy::mark_found))
}
