//! # 표정 분석(FaceDetection) 모델
//!
//! Vision API 분석 한 번의 결과입니다. 생성된 뒤에는 수정되지 않습니다.

use crate::scoring::{EmotionScore, Level};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum DetectionStatus {
    Success,
    /// 스키마가 허용하는 값일 뿐, 이 서버는 실패한 분석을 저장하지 않습니다.
    Failure,
}

/// `face_detections` 테이블 한 행
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct FaceDetection {
    pub id: String,
    pub user_id: String,
    /// 서버 디스크상의 저장 경로 (응답에는 내보내지 않음)
    #[serde(skip_serializing)]
    pub image_path: String,
    /// 클라이언트가 접근할 URL (`/uploads/<파일명>`)
    pub image_url: String,
    pub emotion: String,
    pub confidence: f64,
    pub score: i64,
    pub level: Level,
    pub result: String,
    /// 원본 응답 요약 (예: "detected 1 face(s)")
    pub raw_data: String,
    pub status: DetectionStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// 새 분석 기록. 성공한 분석만 저장하므로 상태는 항상 success로 시작합니다.
#[derive(Debug, Clone)]
pub struct NewFaceDetection {
    pub id: String,
    pub user_id: String,
    pub image_path: String,
    pub image_url: String,
    pub emotion: String,
    pub confidence: f64,
    pub score: i64,
    pub level: Level,
    pub result: String,
    pub raw_data: String,
    pub status: DetectionStatus,
}

impl NewFaceDetection {
    pub fn success(
        user_id: &str,
        image_path: String,
        image_url: String,
        emotion: String,
        confidence: f64,
        scored: &EmotionScore,
        face_count: u32,
    ) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            user_id: user_id.to_string(),
            image_path,
            image_url,
            emotion,
            confidence,
            score: scored.score,
            level: scored.level,
            result: scored.description.to_string(),
            raw_data: format!("detected {face_count} face(s)"),
            status: DetectionStatus::Success,
        }
    }
}
