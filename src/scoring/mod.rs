//! # 채점(Scoring) 엔진
//!
//! 설문 답변과 표정 분석 결과를 점수와 위험 등급으로 바꾸는 순수 함수 모음입니다.
//! DB나 HTTP에 전혀 의존하지 않으므로 여러 요청 핸들러에서 동시에 호출해도 안전합니다.
//!
//! 하위 모듈:
//! - `answer`: 문항 하나의 점수 (가중치 × 선택지 번호)
//! - `questionnaire`: 문항 점수 합산 → 등급/설명/제안
//! - `emotion`: 감정 라벨 + 신뢰도 → 점수/등급/설명
//! - `combined`: 설문 70% + 표정 30% 가중 합산
//!
//! ## 등급 구간
//! ```text
//! severe   >= 80
//! moderate >= 60
//! mild     >= 40
//! normal   그 외
//! ```

pub mod answer;
pub mod combined;
pub mod emotion;
pub mod questionnaire;

pub use answer::*;
pub use combined::*;
pub use emotion::*;
pub use questionnaire::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 설문 점수의 만점. 실제 문항 가중치 합과 무관하게 고정입니다.
pub const MAX_QUESTIONNAIRE_SCORE: i64 = 100;

/// 위험 등급 (낮은 순서대로 선언되어 있어 `Ord` 비교가 심각도 비교와 같습니다)
///
/// DB에는 소문자 TEXT(`normal`, `mild`, ...)로 저장됩니다.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Level {
    Normal,
    Mild,
    Moderate,
    Severe,
}

impl Level {
    /// 설문 총점과 종합 점수에 공통으로 쓰는 4단계 구간.
    /// 하한 포함, 높은 구간부터 검사해 처음 맞는 구간을 사용합니다.
    pub fn from_score(score: i64) -> Self {
        if score >= 80 {
            Level::Severe
        } else if score >= 60 {
            Level::Moderate
        } else if score >= 40 {
            Level::Mild
        } else {
            Level::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Normal => "normal",
            Level::Mild => "mild",
            Level::Moderate => "moderate",
            Level::Severe => "severe",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Level::Normal),
            "mild" => Ok(Level::Mild),
            "moderate" => Ok(Level::Moderate),
            "severe" => Ok(Level::Severe),
            other => Err(format!("unknown level: {other}")),
        }
    }
}

/// 채점 단계에서 발생하는 도메인 에러.
/// `AppError`로 변환되어 HTTP 응답이 됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// 답변이 카탈로그에 없는 문항을 가리킴. 제출 전체가 무효가 됩니다.
    #[error("question {0} does not exist")]
    UnknownQuestion(i64),

    /// 이미지에서 얼굴이 하나도 검출되지 않음
    #[error("no face detected in the image")]
    NoFaceDetected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_round_trips_through_str() {
        for level in [Level::Normal, Level::Mild, Level::Moderate, Level::Severe] {
            assert_eq!(level.as_str().parse::<Level>(), Ok(level));
        }
        assert!("critical".parse::<Level>().is_err());
    }

    #[test]
    fn level_ordering_follows_severity() {
        assert!(Level::Normal < Level::Mild);
        assert!(Level::Moderate < Level::Severe);
    }

    #[test]
    fn level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Level::Moderate).unwrap(), "\"moderate\"");
    }
}
