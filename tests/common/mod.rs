//! Shared helpers for the HTTP-level integration tests.
//!
//! Every test gets its own in-memory SQLite database with the migrations
//! (and therefore the seeded question catalog) applied, plus a scripted
//! `EmotionDetector` so no request ever leaves the process.

#![allow(dead_code)]

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tower::ServiceExt;

use mindscreen::config::{Config, VisionConfig, DEFAULT_MAX_FILE_SIZE};
use mindscreen::services::vision::{EmotionDetector, FaceAnalysis, VisionError};
use mindscreen::state::AppState;

pub const PASSWORD: &str = "secret-pass";

// ---------------------------------------------------------------------------
// Fake collaborator
// ---------------------------------------------------------------------------

/// Detector that answers every call with a preset result.
pub struct FakeDetector {
    next: Mutex<Result<FaceAnalysis, String>>,
}

impl FakeDetector {
    pub fn face(emotion: &str, confidence: f64) -> Self {
        Self {
            next: Mutex::new(Ok(FaceAnalysis {
                face_count: 1,
                emotion: emotion.to_string(),
                confidence,
            })),
        }
    }

    pub fn no_face() -> Self {
        Self {
            next: Mutex::new(Ok(FaceAnalysis {
                face_count: 0,
                emotion: String::new(),
                confidence: 0.0,
            })),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            next: Mutex::new(Err(message.to_string())),
        }
    }
}

#[async_trait]
impl EmotionDetector for FakeDetector {
    async fn detect_face(&self, _image: &[u8]) -> Result<FaceAnalysis, VisionError> {
        let next = self.next.lock().unwrap().clone();
        next.map_err(|message| VisionError::Api { code: 500, message })
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Fresh in-memory database with migrations applied.
///
/// A single connection that never expires keeps the in-memory database
/// alive for the whole test.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory pool should open");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations should apply");

    pool
}

pub fn test_config() -> Config {
    let uploads = std::env::temp_dir().join(format!("mindscreen-test-{}", uuid::Uuid::now_v7()));
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        vision: VisionConfig {
            api_key: "key".to_string(),
            secret_key: "secret".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        },
        uploads_path: uploads.to_string_lossy().to_string(),
        max_file_size: DEFAULT_MAX_FILE_SIZE,
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

pub fn build_test_app(pool: SqlitePool, detector: FakeDetector) -> Router {
    build_test_app_with(pool, detector, test_config())
}

pub fn build_test_app_with(pool: SqlitePool, detector: FakeDetector, config: Config) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config),
        detector: Arc::new(detector),
    };
    mindscreen::build_app(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("router should not fail")
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a single-file multipart form.
pub async fn post_image(
    app: Router,
    uri: &str,
    token: &str,
    field: &str,
    file_name: &str,
    bytes: &[u8],
) -> Response {
    let boundary = "mindscreen-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Assert the status and that the envelope's `code` agrees with it.
pub async fn expect_status(response: Response, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], status.as_u16(), "envelope code must match: {json}");
    json
}

// ---------------------------------------------------------------------------
// Domain helpers
// ---------------------------------------------------------------------------

/// Register `username` and return `(user_id, access_token)`.
pub async fn register(app: Router, username: &str) -> (String, String) {
    let body = json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": PASSWORD,
        "age": 30,
        "gender": "female"
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    let json = expect_status(response, StatusCode::OK).await;
    (
        json["data"]["user"]["id"].as_str().unwrap().to_string(),
        json["data"]["access_token"].as_str().unwrap().to_string(),
    )
}

/// Submit answers as `(question_id, ordinal)` pairs.
pub async fn submit(app: Router, token: &str, answers: &[(i64, i64)]) -> Response {
    let answers: Vec<Value> = answers
        .iter()
        .map(|(question_id, answer_value)| {
            json!({ "question_id": question_id, "answer_value": answer_value })
        })
        .collect();
    post_json_auth(
        app,
        "/api/v1/questionnaire/submit",
        token,
        json!({ "answers": answers }),
    )
    .await
}

pub async fn count(pool: &SqlitePool, table: &str, user_id: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table} WHERE user_id = ?");
    let (n,): (i64,) = sqlx::query_as(&sql)
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap();
    n
}
