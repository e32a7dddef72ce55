//! # 종합 결과 합성
//!
//! 최근 설문 점수와 최근 표정 점수를 7:3으로 가중 합산합니다.
//! 합산 결과는 저장하지 않고 요청마다 새로 계산합니다.

use super::Level;
use serde::Serialize;

pub const QUESTIONNAIRE_WEIGHT: f64 = 0.7;
pub const EMOTION_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedScore {
    pub combined_score: i64,
    pub level: Level,
    pub description: &'static str,
    pub suggestions: &'static [&'static str],
}

/// `trunc(설문 × 0.7 + 표정 × 0.3)`
///
/// 반올림이 아니라 0 방향 절삭입니다. 등급 구간은 설문 집계와 같습니다.
pub fn combine(questionnaire_score: i64, emotion_score: i64) -> CombinedScore {
    let weighted = questionnaire_score as f64 * QUESTIONNAIRE_WEIGHT
        + emotion_score as f64 * EMOTION_WEIGHT;
    let combined_score = weighted as i64;
    let level = Level::from_score(combined_score);
    let (description, suggestions) = combined_copy(level);

    CombinedScore {
        combined_score,
        level,
        description,
        suggestions,
    }
}

fn combined_copy(level: Level) -> (&'static str, &'static [&'static str]) {
    match level {
        Level::Severe => (
            "The combined assessment shows a strong tendency toward depression. Please seek professional help right away.",
            &[
                "Contact a counselor or psychiatrist right away",
                "Keep a regular daily schedule",
                "Talk with family and friends often",
                "Avoid spending long periods alone",
                "Consider medical treatment",
            ],
        ),
        Level::Moderate => (
            "The combined assessment shows a moderate tendency toward depression. Adjust your routine and consider professional support.",
            &[
                "Consider talking to a counselor",
                "Spend more time outdoors and exercise",
                "Cultivate hobbies and interests",
                "Stay socially active",
                "Learn relaxation techniques",
            ],
        ),
        Level::Mild => (
            "The combined assessment shows a mild tendency toward depression, within the normal range.",
            &[
                "Get outside more often",
                "Keep a regular daily schedule",
                "Talk with friends more",
                "Practice a positive mindset",
                "Learn to manage stress",
            ],
        ),
        Level::Normal => (
            "The combined assessment shows a good mental state. Keep up your positive outlook.",
            &[
                "Keep up your healthy habits",
                "Check in on your mental health regularly",
                "Help the people around you stay well",
                "Cultivate hobbies and interests",
            ],
        ),
    }
}
