//! HTTP-level integration tests for authentication and user management.

mod common;

use axum::http::StatusCode;
use sqlx::PgPool;

/// Successful login returns 200 with an access token and user info.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let (user, password) = common::create_test_user(&pool, "loginuser").await;
    let app = common::build_test_app(pool).await;

    let body = serde_json::json!({ "username": "loginuser", "password": password });
    let response = common::post_json(&app, "/api/v1/auth/login", body).await;
    let json = common::assert_status(response, StatusCode::OK).await;

    assert!(
        json["access_token"].is_string(),
        "response must contain access_token"
    );
    assert!(json["expires_in"].is_number());
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "loginuser");
    assert_eq!(json["user"]["email"], "loginuser@test.com");
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    common::create_test_user(&pool, "wrongpw").await;
    let app = common::build_test_app(pool).await;

    let body = serde_json::json!({ "username": "wrongpw", "password": "incorrect_password" });
    let response = common::post_json(&app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent username returns 401 with the same message as a
/// wrong password (no account-existence leak).
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = common::post_json(&app, "/api/v1/auth/login", body).await;
    let json = common::assert_status(response, StatusCode::UNAUTHORIZED).await;

    assert_eq!(json["error"], "Invalid username or password");
}

/// /auth/me identifies the token's user.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_identifies_user(pool: PgPool) {
    let (user, _) = common::create_test_user(&pool, "whoami").await;
    let app = common::build_test_app(pool).await;
    let token = common::auth_token(user.id);

    let response = common::get_auth(&app, "/api/v1/auth/me", &token).await;
    let json = common::assert_status(response, StatusCode::OK).await;

    assert_eq!(json["id"], user.id);
    assert_eq!(json["username"], "whoami");
}

/// Protected endpoints reject requests without a token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_protected_endpoint_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = common::get(&app, "/api/v1/assets").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Garbage tokens are rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_token_rejected(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let response = common::get_auth(&app, "/api/v1/assets", "not-a-real-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// User creation hashes the password and duplicate emails conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_user_and_duplicate_email(pool: PgPool) {
    let (admin, _) = common::create_test_user(&pool, "admin").await;
    let app = common::build_test_app(pool.clone()).await;
    let token = common::auth_token(admin.id);

    let body = serde_json::json!({
        "username": "newbie",
        "email": "newbie@test.com",
        "password": "long-enough-password",
    });
    let response = common::post_json_auth(&app, "/api/v1/users", &token, body.clone()).await;
    let json = common::assert_status(response, StatusCode::CREATED).await;
    assert_eq!(json["data"]["username"], "newbie");
    assert!(
        json["data"].get("password_hash").is_none(),
        "password hash must not be serialized"
    );

    // Same email again: typed conflict, not a 500.
    let response = common::post_json_auth(&app, "/api/v1/users", &token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Too-short passwords are rejected up front.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_user_short_password(pool: PgPool) {
    let (admin, _) = common::create_test_user(&pool, "admin").await;
    let app = common::build_test_app(pool).await;
    let token = common::auth_token(admin.id);

    let body = serde_json::json!({
        "username": "shorty",
        "email": "shorty@test.com",
        "password": "short",
    });
    let response = common::post_json_auth(&app, "/api/v1/users", &token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
