//! # mindscreen
//!
//! 자가진단 설문과 표정(감정) 분석을 결합한 정신건강 스크리닝 백엔드입니다.
//!
//! 모듈 구성 (안쪽부터):
//! - `scoring`: 순수 채점 엔진 (문항 점수, 설문 합산, 감정 점수, 종합 점수)
//! - `models`: DB 행, 요청/응답 구조체
//! - `db`: SQLite 쿼리, 설문 제출 트랜잭션
//! - `services`: Vision API 클라이언트, 업로드 파일 처리
//! - `middleware`: JWT 인증
//! - `routes`: Axum 핸들러
//!
//! 서버 실행 파일(main.rs)과 통합 테스트(tests/)가 모두 `build_app()`으로
//! 같은 라우터를 조립합니다.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod scoring;
pub mod services;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use routes::*;
use state::AppState;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// multipart 경계와 다른 필드를 위한 여유분. 실제 이미지 크기 검사는 핸들러가 합니다.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

/// 전체 라우터를 조립합니다.
///
/// - `/api/v1/...`: JSON API
/// - `/uploads/...`: 업로드된 이미지 정적 서빙
pub fn build_app(state: AppState) -> Router {
    let uploads_dir = ServeDir::new(&state.config.uploads_path);
    let body_limit = usize::try_from(state.config.max_file_size)
        .unwrap_or(usize::MAX)
        .saturating_add(BODY_LIMIT_SLACK);

    // 인증 관련 라우트
    let auth_routes = Router::new()
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/refresh", post(routes::auth::refresh))
        .route("/auth/logout", post(routes::auth::logout))
        .route("/user/profile", get(routes::auth::profile));

    let api_routes = Router::new()
        .merge(auth_routes)
        // 문항 카탈로그
        .route("/questions", get(list_questions))
        .route("/questions/{id}", get(get_question))
        // 설문 제출
        .route("/questionnaire/submit", post(submit_questionnaire))
        // 평가
        .route("/assessment", post(create_assessment))
        .route("/assessments", get(list_assessments))
        .route("/assessments/{id}", get(get_assessment))
        .route("/assessment/combined", get(combined_result))
        .route("/assessment/total", get(combined_result))
        // 표정 분석
        .route("/face/upload", post(upload_face))
        .route("/face/history", get(face_history))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    // 개발 편의상 모든 출처를 허용합니다. 운영에서는 도메인을 지정해야 합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest_service("/uploads", uploads_dir)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
