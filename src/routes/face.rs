//! # 표정 분석 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/v1/face/upload`  → multipart `image` 필드로 사진 업로드 후 분석
//! - `GET  /api/v1/face/history` → 내 분석 기록 (페이지)
//!
//! ## 업로드 처리 순서
//! 1. multipart에서 `image` 필드를 찾아 바이트로 읽음
//! 2. 크기/확장자 검사
//! 3. Vision API로 얼굴/감정 분석 (얼굴이 없으면 400, 파일은 저장하지 않음)
//! 4. 감정 점수 계산
//! 5. 업로드 디렉토리에 저장 후 DB에 기록

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    scoring::score_detection,
    services::uploads,
    state::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Multipart, Query, State},
    Json,
};

/// multipart 폼에서 이미지를 담는 필드 이름
const IMAGE_FIELD: &str = "image";

/// `POST /face/upload` — 얼굴 사진을 분석하고 결과를 저장합니다.
pub async fn upload_face(
    State(state): State<AppState>,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<FaceDetection>>, AppError> {
    // 1. image 필드 찾기 (다른 필드는 건너뜀)
    let mut image: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        image = Some((file_name, bytes.to_vec()));
        break;
    }
    let (file_name, bytes) =
        image.ok_or(AppError::InvalidInput("Please select an image to upload".to_string()))?;

    // 2. 검사
    let size = bytes.len() as u64;
    if let Err(err) = uploads::validate_image(&file_name, size, state.config.max_file_size) {
        tracing::warn!(
            user_id = %auth_user.user_id,
            file_name = %file_name,
            size,
            "Rejected upload: {}",
            err
        );
        return Err(err);
    }

    // 3~4. 분석과 채점
    let analysis = state.detector.detect_face(&bytes).await?;
    let scored = score_detection(analysis.face_count, &analysis.emotion, analysis.confidence)?;

    // 5. 저장
    let stored_name = uploads::stored_file_name(&file_name, chrono::Utc::now());
    let full_path = uploads::save_image(&state.config.uploads_path, &stored_name, &bytes).await?;

    let new = NewFaceDetection::success(
        &auth_user.user_id,
        full_path.to_string_lossy().to_string(),
        format!("/uploads/{stored_name}"),
        analysis.emotion,
        analysis.confidence,
        &scored,
        analysis.face_count,
    );
    let detection = match db::create_face_detection(&state.pool, &new).await {
        Ok(detection) => detection,
        Err(err) => {
            // 기록이 없는 파일이 남지 않도록 지웁니다.
            if let Err(io_err) = tokio::fs::remove_file(&full_path).await {
                tracing::warn!(path = %full_path.display(), "Failed to remove orphaned upload: {}", io_err);
            }
            return Err(err);
        }
    };

    tracing::info!(
        user_id = %auth_user.user_id,
        detection_id = %detection.id,
        emotion = %detection.emotion,
        score = detection.score,
        "Face detection stored"
    );

    Ok(Json(ApiResponse::with_message("Face analysis completed", detection)))
}

/// `GET /face/history` — 내 표정 분석 기록을 최신순으로 한 페이지 반환합니다.
///
/// `page`는 1 이상, `page_size`는 1..=100 범위이며 벗어나면 기본값(1, 10)을 씁니다.
pub async fn face_history(
    State(state): State<AppState>,
    auth_user: AuthUser,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Page<FaceDetection>>>, AppError> {
    let Query(query) = query?;
    let (page, page_size) = query.normalized();

    let (list, total) =
        db::list_face_detections(&state.pool, &auth_user.user_id, page_size, query.offset())
            .await?;

    Ok(Json(ApiResponse::success(Page {
        list,
        total,
        page,
        page_size,
    })))
}
