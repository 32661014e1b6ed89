//! Route definitions for the location hierarchy.
//!
//! Buildings, floors, and rooms are separate top-level resources, so this
//! module returns a merged router rather than a single nest.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::locations;
use crate::state::AppState;

/// Location hierarchy routes.
///
/// ```text
/// GET    /buildings              -> list_buildings
/// POST   /buildings              -> create_building
/// GET    /buildings/{id}         -> get_building
/// PUT    /buildings/{id}         -> update_building
/// DELETE /buildings/{id}         -> delete_building (guarded by floors)
/// GET    /buildings/{id}/floors  -> list_building_floors
/// POST   /floors                 -> create_floor
/// PUT    /floors/{id}            -> update_floor
/// DELETE /floors/{id}            -> delete_floor (guarded by rooms)
/// GET    /floors/{id}/rooms      -> list_floor_rooms
/// GET    /rooms                  -> list_rooms
/// POST   /rooms                  -> create_room
/// GET    /rooms/{id}             -> get_room
/// PUT    /rooms/{id}             -> update_room
/// DELETE /rooms/{id}             -> delete_room (guarded by assets)
/// GET    /rooms/{id}/assets      -> list_room_assets
/// GET    /rooms/{id}/assignees   -> list_room_assignees
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/buildings",
            get(locations::list_buildings).post(locations::create_building),
        )
        .route(
            "/buildings/{id}",
            get(locations::get_building)
                .put(locations::update_building)
                .delete(locations::delete_building),
        )
        .route("/buildings/{id}/floors", get(locations::list_building_floors))
        .route("/floors", post(locations::create_floor))
        .route(
            "/floors/{id}",
            put(locations::update_floor).delete(locations::delete_floor),
        )
        .route("/floors/{id}/rooms", get(locations::list_floor_rooms))
        .route(
            "/rooms",
            get(locations::list_rooms).post(locations::create_room),
        )
        .route(
            "/rooms/{id}",
            get(locations::get_room)
                .put(locations::update_room)
                .delete(locations::delete_room),
        )
        .route("/rooms/{id}/assets", get(locations::list_room_assets))
        .route("/rooms/{id}/assignees", get(locations::list_room_assignees))
}
