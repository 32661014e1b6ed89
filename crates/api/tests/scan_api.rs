//! HTTP-level integration tests for browsing the scan event log.

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

async fn scan_into(app: &axum::Router, token: &str, asset_id: &str, room: &str) {
    let body = serde_json::json!({ "room_id": room });
    let response =
        common::post_json_auth(app, &format!("/api/v1/assets/{asset_id}/location"), token, body)
            .await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Asset history is returned newest first and carries the change-log
/// summary.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_history_newest_first(pool: PgPool) {
    let (user, _) = common::create_test_user(&pool, "scanner").await;
    common::create_location_chain(&pool, "B1", "F1", "R1").await;
    common::create_room(&pool, "F1", "R2").await;
    let app = common::build_test_app(pool).await;
    let token = common::auth_token(user.id);

    create_asset(&app, &token, "A001", "R1").await;
    scan_into(&app, &token, "A001", "R2").await;
    scan_into(&app, &token, "A001", "R1").await;

    let response = common::get_auth(&app, "/api/v1/scans/asset/A001", &token).await;
    let json = common::assert_status(response, StatusCode::OK).await;
    let events = json["data"].as_array().unwrap();
    assert_eq!(events.len(), 2);

    // Newest first: the return to R1 precedes the move to R2.
    assert_eq!(events[0]["room_id"], "R1");
    assert_eq!(events[0]["status"], "Good");
    assert_eq!(events[1]["room_id"], "R2");
    assert_eq!(events[1]["status"], "Misplaced");
    assert_eq!(
        events[0]["change_log"],
        "Asset A001 scanned in room R1 with status Good"
    );

    // Scan ids are unique even within the same second.
    assert_ne!(events[0]["scan_id"], events[1]["scan_id"]);

    // Single-event fetch by scan id.
    let scan_id = events[0]["scan_id"].as_str().unwrap();
    let response = common::get_auth(&app, &format!("/api/v1/scans/{scan_id}"), &token).await;
    let json = common::assert_status(response, StatusCode::OK).await;
    assert_eq!(json["data"]["scan_id"], scan_id);
    assert_eq!(json["data"]["asset_id"], "A001");
}

/// Room and status views filter the log.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_room_and_status_views(pool: PgPool) {
    let (user, _) = common::create_test_user(&pool, "scanner").await;
    common::create_location_chain(&pool, "B1", "F1", "R1").await;
    common::create_room(&pool, "F1", "R2").await;
    let app = common::build_test_app(pool).await;
    let token = common::auth_token(user.id);

    create_asset(&app, &token, "A001", "R1").await;
    create_asset(&app, &token, "A002", "R1").await;
    scan_into(&app, &token, "A001", "R2").await;
    scan_into(&app, &token, "A002", "R1").await;

    let response = common::get_auth(&app, "/api/v1/scans/room/R2", &token).await;
    let json = common::assert_status(response, StatusCode::OK).await;
    let events = json["data"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["asset_id"], "A001");

    let response = common::get_auth(&app, "/api/v1/scans/status/Misplaced", &token).await;
    let json = common::assert_status(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

/// The recent view honors its limit.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_recent_limit(pool: PgPool) {
    let (user, _) = common::create_test_user(&pool, "scanner").await;
    common::create_location_chain(&pool, "B1", "F1", "R1").await;
    common::create_room(&pool, "F1", "R2").await;
    let app = common::build_test_app(pool).await;
    let token = common::auth_token(user.id);

    create_asset(&app, &token, "A001", "R1").await;
    for _ in 0..3 {
        scan_into(&app, &token, "A001", "R2").await;
        scan_into(&app, &token, "A001", "R1").await;
    }

    let response = common::get_auth(&app, "/api/v1/scans/recent?limit=4", &token).await;
    let json = common::assert_status(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 4);

    let response = common::get_auth(&app, "/api/v1/scans/recent", &token).await;
    let json = common::assert_status(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 6);
}
