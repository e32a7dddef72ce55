//! # 평가(Assessment) 모델
//!
//! 평가 하나는 한 번의 채점 실행입니다.
//!
//! ## 평가 라이프사이클
//! ```text
//! [제출 시작] INSERT (in_progress) → 답변 채점 → UPDATE (점수/등급/결과, completed) → [커밋]
//! ```
//! 위 과정은 하나의 트랜잭션이라 중간 상태는 외부에 보이지 않습니다.
//!
//! `combined` 종류는 요청 시 계산되는 뷰일 뿐이라 절대 저장되지 않습니다.

use crate::error::AppError;
use crate::scoring::Level;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// 평가 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AssessmentKind {
    Questionnaire,
    Face,
    Combined,
}

/// 평가 진행 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum AssessmentStatus {
    InProgress,
    Completed,
}

/// `assessments` 테이블 한 행 (suggestions는 JSON 배열 문자열로 저장됨)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AssessmentRow {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub kind: AssessmentKind,
    pub total_score: i64,
    pub max_score: i64,
    pub level: Option<Level>,
    pub result: Option<String>,
    pub suggestions: Json<Vec<String>>,
    pub status: AssessmentStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: AssessmentKind,
    pub total_score: i64,
    pub max_score: i64,
    /// 채점 전(in_progress)에는 None
    pub level: Option<Level>,
    pub result: Option<String>,
    pub suggestions: Vec<String>,
    pub status: AssessmentStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AssessmentRow> for Assessment {
    fn from(row: AssessmentRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            kind: row.kind,
            total_score: row.total_score,
            max_score: row.max_score,
            level: row.level,
            result: row.result,
            suggestions: row.suggestions.0,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// 새 평가를 만들 때 필요한 값들.
///
/// 기본 상태(status)는 생성자가 명시적으로 정합니다.
#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub kind: AssessmentKind,
    pub max_score: i64,
    pub status: AssessmentStatus,
}

impl NewAssessment {
    /// 진행 중(in_progress) 상태의 평가를 준비합니다.
    /// `combined`는 저장 대상이 아니므로 InvalidInput입니다.
    pub fn new(user_id: &str, title: &str, kind: AssessmentKind) -> Result<Self, AppError> {
        if kind == AssessmentKind::Combined {
            return Err(AppError::InvalidInput(
                "Combined assessments are computed on request and cannot be created".to_string(),
            ));
        }
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidInput("Title must not be empty".to_string()));
        }

        Ok(Self {
            id: uuid::Uuid::now_v7().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            kind,
            max_score: 0,
            status: AssessmentStatus::InProgress,
        })
    }

    /// 설문 제출용 평가. 만점은 상수 100입니다.
    pub fn questionnaire(user_id: &str) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            user_id: user_id.to_string(),
            title: "Depression self-assessment".to_string(),
            kind: AssessmentKind::Questionnaire,
            max_score: crate::scoring::MAX_QUESTIONNAIRE_SCORE,
            status: AssessmentStatus::InProgress,
        }
    }
}

/// `POST /assessment` 요청 본문
#[derive(Debug, Deserialize)]
pub struct CreateAssessmentRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: AssessmentKind,
}

/// `answers` 테이블 한 행
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Answer {
    pub id: String,
    pub assessment_id: String,
    pub user_id: String,
    pub question_id: i64,
    pub answer_value: i64,
    pub content: String,
    pub score: i64,
    pub created_at: String,
}

/// 답변까지 포함한 평가 상세
#[derive(Debug, Serialize)]
pub struct AssessmentWithAnswers {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub answers: Vec<Answer>,
}

/// 설문 제출 응답
#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub assessment_id: String,
    pub score: i64,
    pub max_score: i64,
    pub percentage: f64,
    pub level: Level,
    pub description: &'static str,
    pub suggestions: &'static [&'static str],
}

/// 종합 결과에 함께 실어 보내는 설문 요약
#[derive(Debug, Serialize)]
pub struct QuestionnaireSummary {
    pub assessment_id: String,
    pub score: i64,
    pub level: Option<Level>,
}

/// 종합 결과에 함께 실어 보내는 표정 분석 요약
#[derive(Debug, Serialize)]
pub struct DetectionSummary {
    pub detection_id: String,
    pub score: i64,
    pub level: Level,
    pub emotion: String,
}

/// `GET /assessment/total` 응답 (저장되지 않는 계산 결과)
#[derive(Debug, Serialize)]
pub struct CombinedResultResponse {
    pub combined_score: i64,
    pub combined_level: Level,
    pub description: &'static str,
    pub suggestions: &'static [&'static str],
    pub questionnaire: QuestionnaireSummary,
    pub face_detection: DetectionSummary,
    pub assessment_date: String,
    pub detection_date: String,
}
