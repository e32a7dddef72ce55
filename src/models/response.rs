//! # 공통 응답 형식
//!
//! 모든 JSON 응답은 같은 봉투(envelope) 모양을 가집니다.
//!
//! ```text
//! { "code": 200, "message": "success", "data": { ... } }
//! ```
//!
//! 목록 응답은 `data` 안에 `{ list, total, page, page_size }`를 담습니다.
//! 에러 응답은 `data` 없이 `code`와 `message`만 보냅니다 (error.rs 참고).

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::with_message("success", data)
    }

    pub fn with_message(message: &str, data: T) -> Self {
        Self {
            code: 200,
            message: message.to_string(),
            data: Some(data),
        }
    }
}

/// 페이지 단위 목록
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub list: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

/// 목록 API의 쿼리 파라미터 (`?page=2&page_size=20`)
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageQuery {
    pub const DEFAULT_PAGE_SIZE: i64 = 10;
    pub const MAX_PAGE_SIZE: i64 = 100;

    /// (page, page_size)를 정규화합니다.
    /// page는 최소 1, page_size가 1..=100 밖이면 기본값 10.
    pub fn normalized(&self) -> (i64, i64) {
        let page = self.page.filter(|p| *p >= 1).unwrap_or(1);
        let page_size = self
            .page_size
            .filter(|s| (1..=Self::MAX_PAGE_SIZE).contains(s))
            .unwrap_or(Self::DEFAULT_PAGE_SIZE);
        (page, page_size)
    }

    pub fn offset(&self) -> i64 {
        let (page, page_size) = self.normalized();
        (page - 1) * page_size
    }
}
