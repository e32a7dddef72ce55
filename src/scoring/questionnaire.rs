//! # 설문 집계
//!
//! 문항별 점수를 합산하고 총점을 등급/설명/제안 목록으로 바꿉니다.
//!
//! ## 흐름
//! ```text
//! [답변들] --score_submission()--> [문항별 점수 + 라벨] --aggregate()--> [총점, 등급, 설명, 제안]
//! ```
//!
//! 답변 중 하나라도 카탈로그에 없는 문항을 가리키면 전체가 실패합니다.
//! 부분 합계는 만들지 않습니다.

use super::{answer_label, score_answer, Level, ScoringError, MAX_QUESTIONNAIRE_SCORE};
use crate::models::{AnswerRequest, Question};
use serde::Serialize;

/// 설문 채점 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionnaireResult {
    pub total_score: i64,
    /// 항상 100. 문항 수나 가중치에서 유도하지 않습니다.
    pub max_score: i64,
    /// `total_score / max_score * 100`. 100을 넘을 수 있습니다.
    pub percentage: f64,
    pub level: Level,
    pub description: &'static str,
    pub suggestions: &'static [&'static str],
}

/// 채점된 답변 하나 (answers 테이블 한 행이 됩니다)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredAnswer {
    pub question_id: i64,
    pub answer_value: i64,
    /// 선택지 라벨, 범위 밖이면 "invalid option N"
    pub content: String,
    pub score: i64,
}

/// 제출 하나를 채점한 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSubmission {
    pub answers: Vec<ScoredAnswer>,
    pub result: QuestionnaireResult,
}

/// 문항별 점수를 합산해 등급을 매깁니다.
pub fn aggregate(scores: &[i64]) -> QuestionnaireResult {
    let total_score = scores.iter().fold(0i64, |acc, s| acc.saturating_add(*s));
    let level = Level::from_score(total_score);
    let (description, suggestions) = questionnaire_copy(level);

    QuestionnaireResult {
        total_score,
        max_score: MAX_QUESTIONNAIRE_SCORE,
        percentage: total_score as f64 / MAX_QUESTIONNAIRE_SCORE as f64 * 100.0,
        level,
        description,
        suggestions,
    }
}

/// 답변 목록을 카탈로그에 대조해 채점합니다.
///
/// `lookup`은 문항 ID로 카탈로그 항목을 찾는 함수입니다.
/// 저장소 계층이 트랜잭션 안에서 읽어 온 문항들을 넘겨줍니다.
///
/// # 에러
/// 답변 순서대로 검사하다가 처음 발견한 미존재 문항의 ID로
/// `ScoringError::UnknownQuestion`을 돌려줍니다.
pub fn score_submission<'a, F>(
    answers: &[AnswerRequest],
    lookup: F,
) -> Result<ScoredSubmission, ScoringError>
where
    F: Fn(i64) -> Option<&'a Question>,
{
    let scored = answers
        .iter()
        .map(|answer| {
            let question =
                lookup(answer.question_id).ok_or(ScoringError::UnknownQuestion(answer.question_id))?;
            Ok(ScoredAnswer {
                question_id: question.id,
                answer_value: answer.answer_value,
                content: answer_label(&question.options, answer.answer_value),
                score: score_answer(question.weight, answer.answer_value),
            })
        })
        .collect::<Result<Vec<_>, ScoringError>>()?;

    let scores: Vec<i64> = scored.iter().map(|a| a.score).collect();
    Ok(ScoredSubmission {
        result: aggregate(&scores),
        answers: scored,
    })
}

fn questionnaire_copy(level: Level) -> (&'static str, &'static [&'static str]) {
    match level {
        Level::Severe => (
            "Your answers indicate a strong tendency toward depression. Please reach out to a mental health professional as soon as possible.",
            &[
                "Contact a counselor or psychiatrist as soon as possible",
                "Keep a regular daily schedule",
                "Talk with family and friends often",
                "Avoid spending long periods alone",
            ],
        ),
        Level::Moderate => (
            "Your answers indicate a moderate tendency toward depression. Try to adjust your routine and consider professional support.",
            &[
                "Consider talking to a counselor",
                "Spend more time outdoors and exercise",
                "Cultivate hobbies and interests",
                "Stay socially active",
            ],
        ),
        Level::Mild => (
            "Your answers indicate a mild tendency toward depression, within the normal range. Small adjustments can help.",
            &[
                "Get outside more often",
                "Keep a regular daily schedule",
                "Talk with friends more",
                "Practice a positive mindset",
            ],
        ),
        Level::Normal => (
            "Your mental state looks good. Keep up your positive outlook.",
            &[
                "Keep up your healthy habits",
                "Check in on your mental health regularly",
                "Help the people around you stay well",
            ],
        ),
    }
}
