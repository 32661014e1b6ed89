//! Shared harness for HTTP-level integration tests.
//!
//! Mirrors the router construction in `main.rs` so integration tests
//! exercise the same middleware stack (CORS, request ID, tracing, panic
//! recovery) that production uses.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use stocktake_api::auth::jwt::{generate_access_token, JwtConfig};
use stocktake_api::auth::password::hash_password;
use stocktake_api::config::ServerConfig;
use stocktake_api::routes;
use stocktake_api::state::AppState;
use stocktake_db::models::location::{CreateBuilding, CreateFloor, CreateRoom};
use stocktake_db::models::user::CreateUser;
use stocktake_db::repositories::{ensure_sentinels, BuildingRepo, FloorRepo, RoomRepo, UserRepo};

/// Fixed JWT secret for tests.
const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router against the given pool, seeding the
/// sentinel locations first (as startup does).
pub async fn build_test_app(pool: PgPool) -> Router {
    ensure_sentinels(&pool)
        .await
        .expect("sentinel seeding should succeed");

    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

/// Create a test user directly in the database and return the user row plus
/// the plaintext password used.
pub async fn create_test_user(
    pool: &PgPool,
    username: &str,
) -> (stocktake_db::models::user::User, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: hashed,
        },
    )
    .await
    .expect("user creation should succeed");
    (user, password.to_string())
}

/// Generate a Bearer token for the given user id with the test JWT config.
pub fn auth_token(user_id: i64) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Location fixtures
// ---------------------------------------------------------------------------

/// Create a building/floor/room chain for tests.
pub async fn create_location_chain(
    pool: &PgPool,
    building_id: &str,
    floor_id: &str,
    room_id: &str,
) {
    BuildingRepo::create(
        pool,
        &CreateBuilding {
            building_id: building_id.to_string(),
            building_name: format!("Building {building_id}"),
        },
    )
    .await
    .expect("building creation should succeed");
    FloorRepo::create(
        pool,
        &CreateFloor {
            floor_id: floor_id.to_string(),
            building_id: building_id.to_string(),
            floor_name: format!("Floor {floor_id}"),
        },
    )
    .await
    .expect("floor creation should succeed");
    RoomRepo::create(
        pool,
        &CreateRoom {
            room_id: room_id.to_string(),
            floor_id: floor_id.to_string(),
            room_name: format!("Room {room_id}"),
        },
    )
    .await
    .expect("room creation should succeed");
}

/// Add another room to an existing floor.
pub async fn create_room(pool: &PgPool, floor_id: &str, room_id: &str) {
    RoomRepo::create(
        pool,
        &CreateRoom {
            room_id: room_id.to_string(),
            floor_id: floor_id.to_string(),
            room_name: format!("Room {room_id}"),
        },
    )
    .await
    .expect("room creation should succeed");
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// GET without authentication.
pub async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should not fail")
}

/// GET with a Bearer token.
pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should not fail")
}

/// POST a JSON body without authentication.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request should build"),
        )
        .await
        .expect("request should not fail")
}

/// POST a JSON body with a Bearer token.
pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::from(body.to_string()))
                .expect("request should build"),
        )
        .await
        .expect("request should not fail")
}

/// PUT a JSON body with a Bearer token.
pub async fn put_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::PUT)
                .uri(uri)
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::from(body.to_string()))
                .expect("request should build"),
        )
        .await
        .expect("request should not fail")
}

/// DELETE with a Bearer token.
pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(uri)
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should not fail")
}

/// POST a CSV file as a multipart upload with a Bearer token.
pub async fn post_csv_auth(app: &Router, uri: &str, token: &str, csv_data: &str) -> Response {
    let boundary = "test-boundary-7MA4YWxkTrZu0gW";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"csvFile\"; filename=\"upload.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {csv_data}\r\n\
         --{boundary}--\r\n"
    );
    app.clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .header("authorization", format!("Bearer {token}"))
                .body(Body::from(body))
                .expect("request should build"),
        )
        .await
        .expect("request should not fail")
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    if bytes.is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert a response status, panicking with the body when it differs.
pub async fn assert_status(response: Response, expected: StatusCode) -> serde_json::Value {
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status, expected, "unexpected status, body: {json}");
    json
}
