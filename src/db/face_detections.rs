//! # 표정 분석 기록 쿼리 모듈
//!
//! 기록은 생성 후 수정되지 않습니다 (insert + select만 존재).

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

/// 표정 분석 결과를 저장하고 저장된 행을 돌려줍니다.
pub async fn create_face_detection(
    pool: &SqlitePool,
    new: &NewFaceDetection,
) -> Result<FaceDetection, AppError> {
    sqlx::query(
        r#"
        INSERT INTO face_detections (id, user_id, image_path, image_url, emotion, confidence,
                                     score, level, result, raw_data, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&new.id)
    .bind(&new.user_id)
    .bind(&new.image_path)
    .bind(&new.image_url)
    .bind(&new.emotion)
    .bind(new.confidence)
    .bind(new.score)
    .bind(new.level)
    .bind(&new.result)
    .bind(&new.raw_data)
    .bind(new.status)
    .execute(pool)
    .await?;

    get_face_detection(pool, &new.id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created face detection".to_string()))
}

pub async fn get_face_detection(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<FaceDetection>, AppError> {
    let detection = sqlx::query_as::<_, FaceDetection>(
        r#"
        SELECT id, user_id, image_path, image_url, emotion, confidence, score, level,
               result, raw_data, status, created_at, updated_at
        FROM face_detections
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(detection)
}

/// 사용자의 가장 최근 표정 분석 기록 (시각이 같으면 ID가 큰 쪽)
pub async fn latest_face_detection(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Option<FaceDetection>, AppError> {
    let detection = sqlx::query_as::<_, FaceDetection>(
        r#"
        SELECT id, user_id, image_path, image_url, emotion, confidence, score, level,
               result, raw_data, status, created_at, updated_at
        FROM face_detections
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(detection)
}

/// 사용자의 표정 분석 기록을 최신순으로 한 페이지 조회하고 전체 개수를 함께 반환합니다.
pub async fn list_face_detections(
    pool: &SqlitePool,
    user_id: &str,
    limit: i64,
    offset: i64,
) -> Result<(Vec<FaceDetection>, i64), AppError> {
    let (total,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM face_detections WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    let detections = sqlx::query_as::<_, FaceDetection>(
        r#"
        SELECT id, user_id, image_path, image_url, emotion, confidence, score, level,
               result, raw_data, status, created_at, updated_at
        FROM face_detections
        WHERE user_id = ?
        ORDER BY created_at DESC, id DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok((detections, total))
}
