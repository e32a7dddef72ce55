//! # 설문 문항 모델
//!
//! 문항 카탈로그는 마이그레이션으로 채워지는 고정 데이터입니다.
//! DB에는 선택지 목록이 JSON 문자열로 저장되지만,
//! 애플리케이션 안에서는 항상 `Vec<String>`으로 다룹니다.
//! 변환은 `TryFrom<QuestionRow>` 한 곳에서만 일어납니다.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 문항 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// 단일 선택
    Single,
    /// 복수 선택
    Multiple,
    /// 서술형
    Text,
}

impl QuestionType {
    pub fn is_choice(&self) -> bool {
        matches!(self, QuestionType::Single | QuestionType::Multiple)
    }
}

impl FromStr for QuestionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(QuestionType::Single),
            "multiple" => Ok(QuestionType::Multiple),
            "text" => Ok(QuestionType::Text),
            other => Err(AppError::Internal(format!("Unknown question type: {other}"))),
        }
    }
}

/// `questions` 테이블 한 행 그대로의 모양 (저장소 경계 전용)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub question_type: String,
    pub category: String,
    /// JSON 배열 문자열, 예: `["Never","Sometimes","Often","Always"]`
    pub options: String,
    pub weight: i64,
    pub order_num: i64,
    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// 카탈로그 문항
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub category: String,
    /// 선택지 라벨. 1번이 가장 가벼운 증상입니다.
    pub options: Vec<String>,
    /// 문항 가중치 (0 이상)
    pub weight: i64,
    pub order_num: i64,
    pub enabled: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<QuestionRow> for Question {
    type Error = AppError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let question_type: QuestionType = row.question_type.parse()?;
        let options: Vec<String> = serde_json::from_str(&row.options).map_err(|e| {
            AppError::Internal(format!("Question {} has malformed options: {}", row.id, e))
        })?;

        if row.weight < 0 {
            return Err(AppError::Internal(format!(
                "Question {} has a negative weight",
                row.id
            )));
        }
        if question_type.is_choice() && options.is_empty() {
            return Err(AppError::Internal(format!(
                "Choice question {} has no options",
                row.id
            )));
        }

        Ok(Question {
            id: row.id,
            title: row.title,
            description: row.description,
            question_type,
            category: row.category,
            options,
            weight: row.weight,
            order_num: row.order_num,
            enabled: row.enabled,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// `GET /questions`의 쿼리 파라미터
#[derive(Debug, Default, Deserialize)]
pub struct QuestionFilter {
    pub category: Option<String>,
    pub enabled: Option<bool>,
}

/// 제출 답변 하나: 문항 ID + 선택지 번호(1부터)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub question_id: i64,
    pub answer_value: i64,
}

/// `POST /questionnaire/submit` 요청 본문
#[derive(Debug, Deserialize)]
pub struct SubmitAnswersRequest {
    pub answers: Vec<AnswerRequest>,
}
