//! # 설문 문항 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/v1/questions`      → 문항 목록 (`?category=depression&enabled=true`)
//! - `GET /api/v1/questions/{id}` → 단일 문항
//!
//! 로그인 없이 조회할 수 있습니다. 카탈로그는 읽기 전용입니다.

use crate::{db, error::AppError, models::*, state::AppState};
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

/// `GET /questions` — 필터에 맞는 문항을 표시 순서대로 반환합니다.
///
/// # Extractor
/// - `Query(filter)`: URL 쿼리 문자열을 `QuestionFilter`로 파싱합니다.
///   `Result<Query<_>, QueryRejection>`으로 받아 파싱 실패도 봉투 형식 400으로 응답합니다.
pub async fn list_questions(
    State(state): State<AppState>,
    filter: Result<Query<QuestionFilter>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Question>>>, AppError> {
    let Query(filter) = filter?;
    let questions = db::list_questions(&state.pool, &filter).await?;
    Ok(Json(ApiResponse::success(questions)))
}

/// `GET /questions/{id}` — 단일 문항을 반환합니다. 없으면 404.
pub async fn get_question(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Question>>, AppError> {
    let Path(id) = id?;
    let question = db::get_question(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(ApiResponse::success(question)))
}
