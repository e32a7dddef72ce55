//! # 설문 제출 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/v1/questionnaire/submit` → 답변 채점 후 평가 저장
//!
//! 요청 예: `{ "answers": [ { "question_id": 1, "answer_value": 3 } ] }`
//!
//! 채점과 저장은 `db::submit_questionnaire()`의 트랜잭션 안에서 한 번에 일어납니다.
//! 존재하지 않는 문항이 하나라도 있으면 400과 함께 아무것도 저장되지 않습니다.

use crate::{
    db, error::AppError, middleware::auth::AuthUser, models::*, state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

/// `POST /questionnaire/submit` — 설문 답변을 제출합니다.
pub async fn submit_questionnaire(
    State(state): State<AppState>,
    auth_user: AuthUser,
    payload: Result<Json<SubmitAnswersRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SubmissionResponse>>, AppError> {
    let Json(req) = payload?;
    if req.answers.is_empty() {
        return Err(AppError::InvalidInput("At least one answer is required".to_string()));
    }

    let (assessment, result) =
        db::submit_questionnaire(&state.pool, &auth_user.user_id, &req.answers).await?;

    tracing::info!(
        user_id = %auth_user.user_id,
        assessment_id = %assessment.id,
        answers = req.answers.len(),
        score = result.total_score,
        level = %result.level,
        "Questionnaire scored"
    );

    Ok(Json(ApiResponse::with_message(
        "Questionnaire submitted",
        SubmissionResponse {
            assessment_id: assessment.id,
            score: result.total_score,
            max_score: result.max_score,
            percentage: result.percentage,
            level: result.level,
            description: result.description,
            suggestions: result.suggestions,
        },
    )))
}
