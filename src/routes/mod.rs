//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `assessments`: 평가 생성/목록/상세, 종합 결과
//! - `auth`: 인증 관련 (회원가입, 로그인, 토큰 갱신, 로그아웃, 내 정보)
//! - `face`: 표정 이미지 업로드와 분석 기록
//! - `health`: 서버 상태 확인 (헬스체크)
//! - `questionnaire`: 설문 제출
//! - `questions`: 문항 카탈로그 조회
//!
//! 모든 성공 응답은 `{ code, message, data }` 봉투(`ApiResponse`)로 감쌉니다.

pub mod assessments;
pub mod auth;
pub mod face;
pub mod health;
pub mod questionnaire;
pub mod questions;

// 각 모듈의 핸들러 함수들을 재공개하여
// lib.rs에서 `routes::list_questions`처럼 바로 접근 가능하게 합니다.
pub use assessments::*;
pub use face::*;
pub use health::*;
pub use questionnaire::*;
pub use questions::*;
