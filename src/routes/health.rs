//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/v1/health` → `{ "code": 200, "message": "success", "data": { "status": "ok", "database": "ok" } }`
//!
//! 로드밸런서나 컨테이너 오케스트레이터가 서버 상태를 확인할 때 씁니다.
//! DB에 `SELECT 1`을 보내 연결 풀이 살아 있는지도 함께 확인합니다.

use crate::{error::AppError, models::ApiResponse, state::AppState};
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// `GET /health` — 서버와 DB 상태를 확인합니다.
///
/// DB가 응답하지 않으면 `AppError::Database`가 되어 500으로 응답합니다.
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;

    Ok(Json(ApiResponse::success(json!({
        "status": "ok",
        "database": "ok"
    }))))
}
