//! Route tree construction.

pub mod assets;
pub mod assignees;
pub mod auth;
pub mod health;
pub mod imports;
pub mod locations;
pub mod scans;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                  login (public)
/// /auth/me                     identify (requires auth)
///
/// /users                       list, create
/// /users/{id}                  get, update, delete
///
/// /assets                      list, create
/// /assets/discrepancies        Missing + Misplaced assets
/// /assets/mark-missing         audit sweep (POST)
/// /assets/bulk-found           bulk mark-found (POST)
/// /assets/bulk-relocate        bulk relocate (POST)
/// /assets/{id}                 get, update details, delete
/// /assets/{id}/location        record observed location (POST)
/// /assets/{id}/lost            mark lost (POST)
/// /assets/{id}/found           mark found (POST)
///
/// /buildings                   list, create
/// /buildings/{id}              get, update, delete (guarded)
/// /buildings/{id}/floors       floors of a building
/// /floors                      create
/// /floors/{id}                 update, delete (guarded)
/// /floors/{id}/rooms           rooms of a floor
/// /rooms                       list, create
/// /rooms/{id}                  get, update, delete (guarded)
/// /rooms/{id}/assets           assets assigned to a room
/// /rooms/{id}/assignees        people whose home room this is
///
/// /assignees                   list, create
/// /assignees/resolve           get-or-create by name (POST)
/// /assignees/{id}              get, update
///
/// /scans/recent                recent events
/// /scans/asset/{asset_id}      history for an asset
/// /scans/room/{room_id}        history for a room
/// /scans/status/{status}       events by status snapshot
/// /scans/{scan_id}             single event
///
/// /imports/assets              asset CSV upload (POST)
/// /imports/locations           location CSV upload (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/assets", assets::router())
        .merge(locations::router())
        .nest("/assignees", assignees::router())
        .nest("/scans", scans::router())
        .nest("/imports", imports::router())
}
