//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 `{code, message}` 봉투의 HTTP 응답으로 변환
//! - `From<ScoringError>`, `From<VisionError>`: 하위 계층 에러를 도메인 에러로 변환
//! - `From<JsonRejection>` 등: 잘못된 요청 본문/쿼리/경로를 400 봉투로 변환
//!
//! HTTP 상태 코드와 본문의 `code` 값은 항상 같습니다.
//! 내부 에러(Database, IO, Internal)는 로그에만 자세히 남기고
//! 클라이언트에는 일반적인 메시지만 보냅니다.

use crate::scoring::ScoringError;
use crate::services::vision::VisionError;
use axum::{
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청 본문/파라미터 모양이 잘못됨 (HTTP 400)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// 답변이 존재하지 않는 문항을 가리킴 (HTTP 400). 제출 전체가 취소됩니다.
    #[error("Question {0} does not exist")]
    UnknownQuestion(i64),

    /// 업로드한 이미지에서 얼굴을 찾지 못함 (HTTP 400)
    #[error("No face detected in the image")]
    NoFaceDetected,

    /// 종합 결과에 필요한 설문 평가가 없음 (HTTP 404)
    #[error("No completed questionnaire assessment found")]
    NoAssessmentFound,

    /// 종합 결과에 필요한 표정 분석 기록이 없음 (HTTP 404)
    #[error("No face detection record found")]
    NoDetectionFound,

    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 인증 실패 (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 권한 없음, 예: 비활성화된 계정 (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 리소스 충돌 (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 외부 Vision API 호출 실패 (HTTP 502)
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx 함수 결과에 `?`를 쓰면 자동으로 이 variant가 됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 파일 입출력 오류 (HTTP 500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::UnknownQuestion(id) => AppError::UnknownQuestion(id),
            ScoringError::NoFaceDetected => AppError::NoFaceDetected,
        }
    }
}

impl From<VisionError> for AppError {
    fn from(err: VisionError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

// 추출기(extractor) 거부도 같은 봉투 형식으로 응답하도록 InvalidInput으로 바꿉니다.
// 핸들러는 `Result<Json<T>, JsonRejection>`을 받아 `?` 한 번으로 처리합니다.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::InvalidInput(err.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::UnknownQuestion(_) | AppError::NoFaceDetected => {
                StatusCode::BAD_REQUEST
            }
            AppError::NoAssessmentFound | AppError::NoDetectionFound | AppError::NotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) | AppError::Database(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    fn into_response(self) -> Response {
        let status = self.status();

        // match: 내부 에러는 로그에만 원인을 남기고 메시지를 일반화합니다.
        let message = match self {
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                "A database error occurred".to_string()
            }
            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                "An IO error occurred".to_string()
            }
            AppError::Upstream(ref msg) => {
                tracing::error!("Vision API failure: {}", msg);
                "Face analysis service is unavailable".to_string()
            }
            AppError::InvalidInput(ref msg)
            | AppError::Unauthorized(ref msg)
            | AppError::Forbidden(ref msg)
            | AppError::Conflict(ref msg) => msg.clone(),
            _ => self.to_string(),
        };

        // 결과: { "code": 404, "message": "Resource not found" }
        let body = Json(json!({
            "code": status.as_u16(),
            "message": message
        }));

        (status, body).into_response()
    }
}
