//! # 평가(Assessment) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/v1/assessment`          → 빈 평가 생성 (`{title, type}`)
//! - `GET  /api/v1/assessments`         → 내 평가 목록 (페이지)
//! - `GET  /api/v1/assessments/{id}`    → 평가 상세 + 답변
//! - `GET  /api/v1/assessment/combined` → 설문 + 표정 종합 결과
//! - `GET  /api/v1/assessment/total`    → 위와 같음 (프론트엔드 호환 경로)
//!
//! 종합 결과는 저장하지 않고 요청마다 계산합니다.

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    scoring::combine,
    state::AppState,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

/// `POST /assessment` — 진행 중 상태의 평가를 만듭니다.
///
/// `type`이 `combined`이면 400입니다. 종합 결과는 저장 대상이 아닙니다.
pub async fn create_assessment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    payload: Result<Json<CreateAssessmentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Assessment>>), AppError> {
    let Json(req) = payload?;
    let new = NewAssessment::new(&auth_user.user_id, &req.title, req.kind)?;
    let assessment = db::create_assessment(&state.pool, &new).await?;

    // 201 Created: 본문의 code도 상태 코드와 맞춥니다.
    let mut body = ApiResponse::with_message("Assessment created", assessment);
    body.code = StatusCode::CREATED.as_u16();
    Ok((StatusCode::CREATED, Json(body)))
}

/// `GET /assessments` — 내 평가를 최신순으로 한 페이지 반환합니다.
pub async fn list_assessments(
    State(state): State<AppState>,
    auth_user: AuthUser,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Page<Assessment>>>, AppError> {
    let Query(query) = query?;
    let (page, page_size) = query.normalized();

    let (list, total) =
        db::list_assessments(&state.pool, &auth_user.user_id, page_size, query.offset()).await?;

    Ok(Json(ApiResponse::success(Page {
        list,
        total,
        page,
        page_size,
    })))
}

/// `GET /assessments/{id}` — 평가와 그 답변들을 반환합니다.
///
/// 다른 사용자의 평가는 존재하지 않는 것처럼 404로 응답합니다.
pub async fn get_assessment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AssessmentWithAnswers>>, AppError> {
    let assessment = db::get_assessment(&state.pool, &auth_user.user_id, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    let answers = db::list_answers(&state.pool, &assessment.id).await?;

    Ok(Json(ApiResponse::success(AssessmentWithAnswers {
        assessment,
        answers,
    })))
}

/// `GET /assessment/combined` — 최근 설문 점수와 최근 표정 점수를 7:3으로 합칩니다.
///
/// # 에러
/// - 완료된 설문 평가가 없으면 `NoAssessmentFound` (404)
/// - 표정 분석 기록이 없으면 `NoDetectionFound` (404)
pub async fn combined_result(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ApiResponse<CombinedResultResponse>>, AppError> {
    let assessment = db::latest_completed_questionnaire(&state.pool, &auth_user.user_id)
        .await?
        .ok_or(AppError::NoAssessmentFound)?;
    let detection = db::latest_face_detection(&state.pool, &auth_user.user_id)
        .await?
        .ok_or(AppError::NoDetectionFound)?;

    let combined = combine(assessment.total_score, detection.score);

    Ok(Json(ApiResponse::success(CombinedResultResponse {
        combined_score: combined.combined_score,
        combined_level: combined.level,
        description: combined.description,
        suggestions: combined.suggestions,
        questionnaire: QuestionnaireSummary {
            assessment_id: assessment.id,
            score: assessment.total_score,
            level: assessment.level,
        },
        face_detection: DetectionSummary {
            detection_id: detection.id,
            score: detection.score,
            level: detection.level,
            emotion: detection.emotion,
        },
        assessment_date: assessment.created_at,
        detection_date: detection.created_at,
    })))
}
