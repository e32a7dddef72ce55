//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `assessment`: 평가, 답변, 종합 결과 응답
//! - `face_detection`: 표정 분석 기록
//! - `question`: 설문 문항 카탈로그와 제출 요청
//! - `response`: `{code, message, data}` 응답 봉투와 페이지 목록
//! - `user`: 사용자 및 인증 요청/응답
//!
//! `pub use X::*;`로 재공개하므로 `crate::models::Question`처럼 짧게 쓸 수 있습니다.

pub mod assessment;
pub mod face_detection;
pub mod question;
pub mod response;
pub mod user;

pub use assessment::*;
pub use face_detection::*;
pub use question::*;
pub use response::*;
pub use user::*;
