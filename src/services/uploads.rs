//! # 업로드 이미지 서비스
//!
//! 표정 분석용 이미지의 검증과 디스크 저장을 담당합니다.
//!
//! 이 모듈의 함수들:
//! - `validate_image()`: 크기와 확장자 검사
//! - `stored_file_name()`: 충돌하지 않는 저장 파일명 생성
//! - `save_image()`: 업로드 디렉토리에 파일 저장

use crate::error::AppError;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 허용하는 이미지 확장자 (소문자, 점 포함)
pub const ALLOWED_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".bmp", ".gif"];

/// 브라우저 카메라로 찍은 이미지의 파일명 표식. 이 경우 확장자 검사를 건너뜁니다.
const CAMERA_CAPTURE_MARKER: &str = "camera_capture";

/// 파일명에서 확장자를 소문자로 꺼냅니다 (점 포함). 없으면 None.
fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

/// 업로드 이미지를 검사합니다.
///
/// # 규칙
/// - 크기가 `max_size` 바이트를 넘으면 거부
/// - 파일명이 비었거나 `camera_capture`를 포함하면 확장자 검사 생략
/// - 그 외에는 `ALLOWED_EXTENSIONS` 중 하나여야 함
pub fn validate_image(file_name: &str, size: u64, max_size: u64) -> Result<(), AppError> {
    if size > max_size {
        return Err(AppError::InvalidInput(format!(
            "File is too large, the limit is {max_size} bytes"
        )));
    }

    if file_name.is_empty() || file_name.to_lowercase().contains(CAMERA_CAPTURE_MARKER) {
        return Ok(());
    }

    match extension_of(file_name) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(AppError::InvalidInput(format!(
            "Unsupported file format, allowed: {}",
            ALLOWED_EXTENSIONS.join(", ")
        ))),
    }
}

/// 저장용 파일명을 만듭니다: `YYYYMMDD_HHMMSS_<uuid 앞 8자>.<ext>`
///
/// 원본 확장자가 `ALLOWED_EXTENSIONS`에 있을 때만 그대로 쓰고,
/// 없거나 허용 목록 밖이면 `.jpg`로 저장합니다.
/// (카메라 캡처는 확장자 검사를 건너뛰므로 `camera_capture.html` 같은 이름도 여기까지 옵니다.)
pub fn stored_file_name(file_name: &str, now: DateTime<Utc>) -> String {
    let ext = extension_of(file_name)
        .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or_else(|| ".jpg".to_string());
    let id = uuid::Uuid::now_v7().simple().to_string();
    // UUIDv7 앞부분은 타임스탬프라 같은 초 안에서 겹칠 수 있으므로 뒤쪽 랜덤 비트를 씁니다.
    let suffix = &id[id.len() - 8..];
    format!("{}_{}{}", now.format("%Y%m%d_%H%M%S"), suffix, ext)
}

/// 이미지를 업로드 디렉토리에 저장하고 전체 경로를 돌려줍니다.
///
/// 디렉토리가 없으면 만듭니다.
pub async fn save_image(
    uploads_path: &str,
    file_name: &str,
    bytes: &[u8],
) -> Result<PathBuf, AppError> {
    fs::create_dir_all(uploads_path).await?;
    let full_path = PathBuf::from(uploads_path).join(file_name);
    fs::write(&full_path, bytes).await?;
    Ok(full_path)
}
