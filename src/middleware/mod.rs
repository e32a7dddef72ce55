//! # 미들웨어 모듈
//!
//! - `auth`: JWT 발급/검증과 `AuthUser` 추출기(extractor)

pub mod auth;
