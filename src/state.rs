//! # 애플리케이션 공유 상태
//!
//! 모든 핸들러가 `State<AppState>`로 받는 구조체입니다.
//! 설정과 외부 협력자(Vision 클라이언트)를 여기서 주입하므로
//! 테스트는 가짜 `EmotionDetector`를 넣어 같은 라우터를 그대로 씁니다.

use crate::config::Config;
use crate::services::vision::EmotionDetector;
use sqlx::SqlitePool;
use std::sync::Arc;

/// 핸들러 간 공유 상태
///
/// `Clone`은 저렴합니다. `SqlitePool`과 `Arc` 모두 참조 카운트만 늘립니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    pub detector: Arc<dyn EmotionDetector>,
}
