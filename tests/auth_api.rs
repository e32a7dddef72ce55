//! HTTP-level tests for registration, login, token refresh and logout.

mod common;

use axum::http::StatusCode;
use common::{
    build_test_app, expect_status, get, get_auth, post_json, post_json_auth, register,
    test_pool, FakeDetector, PASSWORD,
};
use serde_json::{json, Value};

async fn login(app: axum::Router, login: &str, password: &str) -> axum::response::Response {
    post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": login, "password": password }),
    )
    .await
}

fn tokens(json: &Value) -> (String, String) {
    (
        json["data"]["access_token"].as_str().unwrap().to_string(),
        json["data"]["refresh_token"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn health_reports_ok() {
    let app = build_test_app(test_pool().await, FakeDetector::no_face());
    let json = expect_status(get(app, "/api/v1/health").await, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "ok");
}

#[tokio::test]
async fn register_then_fetch_profile() {
    let app = build_test_app(test_pool().await, FakeDetector::no_face());
    let (user_id, token) = register(app.clone(), "profiled").await;

    let json = expect_status(
        get_auth(app, "/api/v1/user/profile", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(json["data"]["id"], user_id);
    assert_eq!(json["data"]["email"], "profiled@example.com");
    assert_eq!(json["data"]["age"], 30);
    assert_eq!(json["data"]["status"], "active");
    assert!(json["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn registration_validation_and_conflicts() {
    let app = build_test_app(test_pool().await, FakeDetector::no_face());
    register(app.clone(), "taken").await;

    let cases = [
        (json!({ "username": "ab", "email": "ab@example.com", "password": PASSWORD }), StatusCode::BAD_REQUEST),
        (json!({ "username": "shortpw", "email": "s@example.com", "password": "12345" }), StatusCode::BAD_REQUEST),
        (json!({ "username": "noemail", "email": "nope", "password": PASSWORD }), StatusCode::BAD_REQUEST),
        (json!({ "username": "taken", "email": "other@example.com", "password": PASSWORD }), StatusCode::CONFLICT),
        (json!({ "username": "fresh", "email": "taken@example.com", "password": PASSWORD }), StatusCode::CONFLICT),
    ];
    for (body, status) in cases {
        expect_status(post_json(app.clone(), "/api/v1/auth/register", body).await, status).await;
    }
}

#[tokio::test]
async fn login_accepts_username_or_email() {
    let app = build_test_app(test_pool().await, FakeDetector::no_face());
    register(app.clone(), "dual").await;

    expect_status(login(app.clone(), "dual", PASSWORD).await, StatusCode::OK).await;
    expect_status(login(app.clone(), "dual@example.com", PASSWORD).await, StatusCode::OK).await;
    expect_status(login(app.clone(), "dual", "wrong-password").await, StatusCode::UNAUTHORIZED).await;
    expect_status(login(app, "ghost", PASSWORD).await, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn disabled_accounts_are_forbidden() {
    let pool = test_pool().await;
    let app = build_test_app(pool.clone(), FakeDetector::no_face());
    register(app.clone(), "benched").await;

    sqlx::query("UPDATE users SET status = 'disabled' WHERE username = 'benched'")
        .execute(&pool)
        .await
        .unwrap();

    expect_status(login(app, "benched", PASSWORD).await, StatusCode::FORBIDDEN).await;
}

#[tokio::test]
async fn refresh_rotates_the_token() {
    let app = build_test_app(test_pool().await, FakeDetector::no_face());
    register(app.clone(), "rotator").await;
    let json = expect_status(login(app.clone(), "rotator", PASSWORD).await, StatusCode::OK).await;
    let (access, refresh) = tokens(&json);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh }),
    )
    .await;
    let json = expect_status(response, StatusCode::OK).await;
    let (_new_access, new_refresh) = tokens(&json);
    assert_ne!(new_refresh, refresh);

    // the old refresh token was consumed
    let response = post_json(
        app.clone(),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh }),
    )
    .await;
    expect_status(response, StatusCode::UNAUTHORIZED).await;

    // an access token is not a refresh token
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": access }),
    )
    .await;
    expect_status(response, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn logout_revokes_refresh_tokens() {
    let app = build_test_app(test_pool().await, FakeDetector::no_face());
    register(app.clone(), "leaver").await;
    let json = expect_status(login(app.clone(), "leaver", PASSWORD).await, StatusCode::OK).await;
    let (access, refresh) = tokens(&json);

    let response = post_json_auth(app.clone(), "/api/v1/auth/logout", &access, json!({})).await;
    expect_status(response, StatusCode::OK).await;

    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh }),
    )
    .await;
    expect_status(response, StatusCode::UNAUTHORIZED).await;
}

#[tokio::test]
async fn protected_routes_need_a_bearer_token() {
    let app = build_test_app(test_pool().await, FakeDetector::no_face());

    expect_status(get(app.clone(), "/api/v1/user/profile").await, StatusCode::UNAUTHORIZED).await;
    expect_status(
        get_auth(app, "/api/v1/user/profile", "not-a-jwt").await,
        StatusCode::UNAUTHORIZED,
    )
    .await;
}
