//! # 감정 채점
//!
//! 외부 Vision API가 돌려준 감정 라벨과 신뢰도(0.0~1.0)를 점수와 등급으로 바꿉니다.
//!
//! | 라벨 | 배수 | 등급 규칙 |
//! |------|------|-----------|
//! | sad | 100 | ≥80 severe, ≥60 moderate, ≥40 mild, 그 외 normal |
//! | angry | 90 | ≥70 moderate, 그 외 mild |
//! | fear | 85 | ≥70 moderate, 그 외 mild |
//! | disgust | 80 | 항상 mild |
//! | surprise | 60 | 항상 normal |
//! | happy | 50 | 항상 normal |
//! | 그 외 (neutral 포함) | 30 | 항상 normal |
//!
//! 부정 감정(sad/angry/fear)은 더 가파른 배수를 받고 높은 등급까지 올라갈 수 있고,
//! 긍정/중립 감정은 normal에서 멈춥니다.

use super::{Level, ScoringError};
use serde::Serialize;

/// Vision API가 분류하는 감정 라벨
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Sad,
    Angry,
    Fear,
    Disgust,
    Surprise,
    Happy,
    /// neutral을 포함해 표에 없는 모든 라벨
    Other,
}

impl Emotion {
    pub fn from_label(label: &str) -> Self {
        match label {
            "sad" => Emotion::Sad,
            "angry" => Emotion::Angry,
            "fear" => Emotion::Fear,
            "disgust" => Emotion::Disgust,
            "surprise" => Emotion::Surprise,
            "happy" => Emotion::Happy,
            _ => Emotion::Other,
        }
    }

    /// 신뢰도에 곱하는 배수
    pub fn multiplier(&self) -> f64 {
        match self {
            Emotion::Sad => 100.0,
            Emotion::Angry => 90.0,
            Emotion::Fear => 85.0,
            Emotion::Disgust => 80.0,
            Emotion::Surprise => 60.0,
            Emotion::Happy => 50.0,
            Emotion::Other => 30.0,
        }
    }

    fn level_for(&self, score: i64) -> Level {
        match self {
            Emotion::Sad => Level::from_score(score),
            Emotion::Angry | Emotion::Fear => {
                if score >= 70 {
                    Level::Moderate
                } else {
                    Level::Mild
                }
            }
            Emotion::Disgust => Level::Mild,
            Emotion::Surprise | Emotion::Happy | Emotion::Other => Level::Normal,
        }
    }
}

/// 감정 채점 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionScore {
    pub score: i64,
    pub level: Level,
    pub description: &'static str,
}

/// 감정 라벨과 신뢰도로 점수/등급/설명을 계산합니다.
///
/// 점수는 `신뢰도 × 배수`를 0 방향으로 잘라낸(truncate) 정수입니다.
pub fn score_emotion(label: &str, confidence: f64) -> EmotionScore {
    let emotion = Emotion::from_label(label);
    let score = (confidence * emotion.multiplier()) as i64;
    let level = emotion.level_for(score);

    EmotionScore {
        score,
        level,
        description: describe(emotion, level),
    }
}

/// 검출된 얼굴 수를 확인한 뒤 첫 번째 얼굴의 감정을 채점합니다.
///
/// 얼굴이 하나도 없으면 `NoFaceDetected`입니다.
/// 여러 개일 때 어떤 얼굴을 고를지는 Vision 클라이언트가 이미 결정했습니다.
pub fn score_detection(
    face_count: u32,
    label: &str,
    confidence: f64,
) -> Result<EmotionScore, ScoringError> {
    if face_count == 0 {
        return Err(ScoringError::NoFaceDetected);
    }
    Ok(score_emotion(label, confidence))
}

fn describe(emotion: Emotion, level: Level) -> &'static str {
    match (emotion, level) {
        (Emotion::Sad, Level::Severe) => {
            "Strong sadness detected. Consider seeking professional counseling."
        }
        (Emotion::Sad, Level::Moderate) => {
            "Moderate sadness detected. Try to take care of your mood."
        }
        (Emotion::Sad, Level::Mild) => "Slight sadness detected, within the normal range.",
        (Emotion::Sad, Level::Normal) => "Emotional state is normal.",
        (Emotion::Angry, Level::Moderate) => "Anger detected. Try to stay calm.",
        (Emotion::Angry, _) => "Slight anger detected, a normal emotional fluctuation.",
        (Emotion::Fear, Level::Moderate) => "Fear detected. Consider looking for support.",
        (Emotion::Fear, _) => "Slight fear detected, a normal reaction.",
        (Emotion::Disgust, _) => "Disgust detected, a normal reaction.",
        (Emotion::Surprise, _) => "Surprise detected, a normal reaction.",
        (Emotion::Happy, _) => "Happiness detected. Your emotional state looks good.",
        (Emotion::Other, _) => "Calm emotional state, within the normal range.",
    }
}
