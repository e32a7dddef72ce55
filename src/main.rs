//! # mindscreen 웹 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 로딩
//! 4. SQLite 데이터베이스 연결 풀 생성
//! 5. 데이터베이스 마이그레이션 실행 (문항 카탈로그 포함)
//! 6. 업로드 디렉토리 생성
//! 7. Vision 클라이언트와 애플리케이션 상태 생성
//! 8. HTTP 서버 시작
//!
//! 라우터 조립은 라이브러리 쪽 `mindscreen::build_app()`이 담당합니다.

use anyhow::Result;
use mindscreen::{
    config::Config,
    services::vision::BaiduVisionClient,
    state::AppState,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{path::Path, str::FromStr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 mindscreen, tower_http, axum을 debug 레벨로 출력합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindscreen=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting mindscreen server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 ──
    // create_if_missing: 처음 실행할 때 DB 파일을 만듭니다.
    let connect_options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    // ── 5단계: 데이터베이스 마이그레이션 실행 ──
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    // ── 6단계: 업로드 디렉토리 생성 ──
    let uploads_path = Path::new(&config.uploads_path);
    if !uploads_path.exists() {
        tokio::fs::create_dir_all(uploads_path).await?;
        tracing::info!("Created uploads directory: {}", config.uploads_path);
    }

    // ── 7단계: Vision 클라이언트와 애플리케이션 상태 생성 ──
    // Arc<dyn EmotionDetector>: 테스트에서는 이 자리에 가짜 구현을 넣습니다.
    let detector = BaiduVisionClient::new(config.vision.clone())?;
    let addr = format!("{}:{}", config.host, config.port);
    let state = AppState {
        pool,
        config: Arc::new(config),
        detector: Arc::new(detector),
    };

    let app = mindscreen::build_app(state);

    // ── 8단계: 서버 시작 ──
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
