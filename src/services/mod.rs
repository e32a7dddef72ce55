//! # 서비스 계층
//!
//! DB 밖의 입출력을 담당합니다.
//! - `uploads`: 업로드 이미지 검사와 디스크 저장
//! - `vision`: 외부 표정 인식 API 클라이언트 (`EmotionDetector` 트레이트)

pub mod uploads;
pub mod vision;
