//! HTTP-level integration tests for discrepancy resolution: lost/found and
//! the bulk actions.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

async fn create_asset(app: &axum::Router, token: &str, id: &str, room: &str) {
    let body = serde_json::json!({
        "id": id,
        "description": "Widget",
        "room_id": room,
    });
    let response = common::post_json_auth(app, "/api/v1/assets", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn scan_count(app: &axum::Router, token: &str, asset_id: &str) -> usize {
    let response =
        common::get_auth(app, &format!("/api/v1/scans/asset/{asset_id}"), token).await;
    let json = common::assert_status(response, StatusCode::OK).await;
    json["data"].as_array().unwrap().len()
}

/// mark_asset_lost is idempotent: the second call leaves the asset Lost and
/// records no additional scan event.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_mark_lost_idempotent(pool: PgPool) {
    let (user, _) = common::create_test_user(&pool, "resolver").await;
    common::create_location_chain(&pool, "B1", "F1", "R1").await;
    let app = common::build_test_app(pool).await;
    let token = common::auth_token(user.id);

    create_asset(&app, &token, "A001", "R1").await;

    let response =
        common::post_json_auth(&app, "/api/v1/assets/A001/lost", &token, serde_json::json!({}))
            .await;
    let json = common::assert_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "Lost");
    assert_eq!(scan_count(&app, &token, "A001").await, 1);

    // Second call: still Lost, no new event.
    let response =
        common::post_json_auth(&app, "/api/v1/assets/A001/lost", &token, serde_json::json!({}))
            .await;
    let json = common::assert_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "Lost");
    assert_eq!(scan_count(&app, &token, "A001").await, 1);
}

/// Found with return_to_room: last_located snaps back to the assigned room.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_mark_found_return_to_room(pool: PgPool) {
    let (user, _) = common::create_test_user(&pool, "resolver").await;
    common::create_location_chain(&pool, "B1", "F1", "R1").await;
    common::create_room(&pool, "F1", "R2").await;
    let app = common::build_test_app(pool).await;
    let token = common::auth_token(user.id);

    create_asset(&app, &token, "A002", "R1").await;
    let body = serde_json::json!({ "room_id": "R2" });
    let response =
        common::post_json_auth(&app, "/api/v1/assets/A002/location", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({ "return_to_room": true });
    let response = common::post_json_auth(&app, "/api/v1/assets/A002/found", &token, body).await;
    let json = common::assert_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["status"], "Good");
    assert_eq!(json["data"]["room_id"], "R1");
    assert_eq!(json["data"]["last_located"], "R1");
}

/// Found without return_to_room: the asset's home is reassigned to where it
/// was last seen.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_mark_found_reassigns_home(pool: PgPool) {
    let (user, _) = common::create_test_user(&pool, "resolver").await;
    common::create_location_chain(&pool, "B1", "F1", "R1").await;
    common::create_room(&pool, "F1", "R2").await;
    let app = common::build_test_app(pool).await;
    let token = common::auth_token(user.id);

    create_asset(&app, &token, "A003", "R1").await;
    let body = serde_json::json!({ "room_id": "R2" });
    let response =
        common::post_json_auth(&app, "/api/v1/assets/A003/location", &token, body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = serde_json::json!({ "return_to_room": false });
    let response = common::post_json_auth(&app, "/api/v1/assets/A003/found", &token, body).await;
    let json = common::assert_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["status"], "Good");
    assert_eq!(json["data"]["room_id"], "R2");
    assert_eq!(json["data"]["last_located"], "R2");

    let response = common::get_auth(&app, "/api/v1/scans/asset/A003", &token).await;
    let json = common::assert_status(response, StatusCode::OK).await;
    let notes = json["data"][0]["notes"].as_str().unwrap();
    assert!(notes.contains("reassigned to current location"), "notes: {notes}");
}

/// Bulk mark-found processes every existing asset, reports missing ones,
/// and appends one event per processed asset.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_bulk_found(pool: PgPool) {
    let (user, _) = common::create_test_user(&pool, "resolver").await;
    common::create_location_chain(&pool, "B1", "F1", "R1").await;
    common::create_room(&pool, "F1", "R2").await;
    let app = common::build_test_app(pool).await;
    let token = common::auth_token(user.id);

    for id in ["A010", "A011"] {
        create_asset(&app, &token, id, "R1").await;
        let body = serde_json::json!({ "room_id": "R2" });
        let response =
            common::post_json_auth(&app, &format!("/api/v1/assets/{id}/location"), &token, body)
                .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let body = serde_json::json!({
        "asset_ids": ["A010", "A011", "GHOST"],
        "notes": "quarterly audit",
    });
    let response = common::post_json_auth(&app, "/api/v1/assets/bulk-found", &token, body).await;
    let json = common::assert_status(response, StatusCode::OK).await;

    assert_eq!(json["data"]["processed"], 2);
    assert_eq!(json["data"]["failed"], 1);

    for id in ["A010", "A011"] {
        let response = common::get_auth(&app, &format!("/api/v1/assets/{id}"), &token).await;
        let json = common::assert_status(response, StatusCode::OK).await;
        assert_eq!(json["data"]["asset"]["status"], "Good");
        assert_eq!(json["data"]["asset"]["last_located"], "R1");
        // Location update + bulk found.
        assert_eq!(json["data"]["history"].as_array().unwrap().len(), 2);
        let notes = json["data"]["history"][0]["notes"].as_str().unwrap();
        assert!(notes.contains("Bulk Mark Found"), "notes: {notes}");
        assert!(notes.contains("quarterly audit"), "notes: {notes}");
    }
}

/// Bulk relocate reassigns home rooms; a nonexistent target room fails the
/// whole batch with zero processed.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_bulk_relocate(pool: PgPool) {
    let (user, _) = common::create_test_user(&pool, "resolver").await;
    common::create_location_chain(&pool, "B1", "F1", "R1").await;
    common::create_room(&pool, "F1", "R2").await;
    let app = common::build_test_app(pool).await;
    let token = common::auth_token(user.id);

    for id in ["A020", "A021"] {
        create_asset(&app, &token, id, "R1").await;
    }

    // Nonexistent target: all-or-nothing failure.
    let body = serde_json::json!({
        "asset_ids": ["A020", "A021"],
        "new_room_id": "NOWHERE",
    });
    let response =
        common::post_json_auth(&app, "/api/v1/assets/bulk-relocate", &token, body).await;
    let json = common::assert_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["processed"], 0);
    assert_eq!(json["data"]["failed"], 2);

    // Valid target: both move.
    let body = serde_json::json!({
        "asset_ids": ["A020", "A021"],
        "new_room_id": "R2",
    });
    let response =
        common::post_json_auth(&app, "/api/v1/assets/bulk-relocate", &token, body).await;
    let json = common::assert_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["processed"], 2);
    assert_eq!(json["data"]["failed"], 0);

    for id in ["A020", "A021"] {
        let response = common::get_auth(&app, &format!("/api/v1/assets/{id}"), &token).await;
        let json = common::assert_status(response, StatusCode::OK).await;
        assert_eq!(json["data"]["asset"]["room_id"], "R2");
        assert_eq!(json["data"]["asset"]["last_located"], "R2");
        assert_eq!(json["data"]["asset"]["status"], "Good");
    }
}
