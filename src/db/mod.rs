//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `assessments`: 평가/답변 쿼리, 설문 제출 트랜잭션
//! - `face_detections`: 표정 분석 기록 쿼리
//! - `questions`: 문항 카탈로그 조회
//! - `users`: 사용자 인증 관련 쿼리

pub mod assessments;
pub mod face_detections;
pub mod questions;
pub mod users;

// 하위 모듈의 공개 함수를 재공개(re-export)하여
// `crate::db::list_questions`처럼 바로 접근할 수 있게 합니다.
// users는 이름이 겹치기 쉬워 `db::users::...`로만 씁니다.
pub use assessments::*;
pub use face_detections::*;
pub use questions::*;
