//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! 서버 시작 시 한 번만 만들고 `AppState`를 통해 각 핸들러에 주입합니다.
//! 채점 엔진이나 Vision 클라이언트가 환경변수를 직접 읽는 일은 없습니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 (필수)
//! - `JWT_SECRET`: JWT 토큰 서명 비밀키 (필수)
//! - `VISION_API_KEY` / `VISION_SECRET_KEY`: 표정 인식 API 자격 증명 (필수)
//! - `VISION_BASE_URL`: 표정 인식 API 주소 (기본값: `https://aip.baidubce.com`)
//! - `VISION_TIMEOUT_SECS`: 표정 인식 API 타임아웃 (기본값: 30)
//! - `UPLOADS_PATH`: 업로드 이미지 저장 디렉토리 (기본값: `data/uploads`)
//! - `MAX_FILE_SIZE`: 업로드 최대 바이트 수 (기본값: 10 MiB)
//! - `HOST` / `PORT`: 서버 바인딩 주소

use std::env;

/// 업로드 최대 크기 기본값 (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// 표정 인식(Vision) API 설정
#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub api_key: String,
    pub secret_key: String,
    /// 끝에 `/`가 없는 기본 URL
    pub base_url: String,
    pub timeout_secs: u64,
}

/// 애플리케이션 전체 설정을 담는 구조체
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 경로 (예: "sqlite:data/mindscreen.db")
    pub database_url: String,
    /// JWT 토큰 서명/검증에 사용하는 비밀키
    pub jwt_secret: String,
    pub vision: VisionConfig,
    /// 업로드 이미지가 저장되는 디렉토리 경로
    pub uploads_path: String,
    /// 업로드 허용 최대 바이트 수
    pub max_file_size: u64,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// 필수 환경변수(`DATABASE_URL`, `JWT_SECRET`, `VISION_API_KEY`,
    /// `VISION_SECRET_KEY`) 중 하나라도 없으면 `VarError`를 반환합니다.
    /// 나머지는 기본값이 있으며, 숫자 파싱에 실패해도 기본값을 사용합니다.
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            vision: VisionConfig {
                api_key: env::var("VISION_API_KEY")?,
                secret_key: env::var("VISION_SECRET_KEY")?,
                base_url: env::var("VISION_BASE_URL")
                    .unwrap_or_else(|_| "https://aip.baidubce.com".to_string())
                    .trim_end_matches('/')
                    .to_string(),
                timeout_secs: env::var("VISION_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            },
            uploads_path: env::var("UPLOADS_PATH")
                .unwrap_or_else(|_| "data/uploads".to_string()),
            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_FILE_SIZE),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        })
    }
}
