//! # 평가(Assessment)와 답변 쿼리 모듈
//!
//! 설문 제출은 이 모듈의 `submit_questionnaire()` 하나의 트랜잭션으로 처리됩니다.
//! 평가 행 생성, 답변 저장, 점수 반영 중 어느 단계에서든 에러가 나면
//! 트랜잭션이 커밋되지 않고 drop되면서 자동으로 롤백됩니다.

use crate::db::questions::find_questions_by_ids;
use crate::error::AppError;
use crate::models::*;
use crate::scoring::{score_submission, QuestionnaireResult};
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashMap;

/// 평가 행을 삽입합니다. 풀과 트랜잭션 양쪽에서 쓰이도록 커넥션을 받습니다.
async fn insert_assessment(
    conn: &mut SqliteConnection,
    new: &NewAssessment,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO assessments (id, user_id, title, kind, max_score, status)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&new.id)
    .bind(&new.user_id)
    .bind(&new.title)
    .bind(new.kind)
    .bind(new.max_score)
    .bind(new.status)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

async fn fetch_assessment(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<Assessment>, AppError> {
    let row = sqlx::query_as::<_, AssessmentRow>(
        r#"
        SELECT id, user_id, title, kind, total_score, max_score, level, result,
               suggestions, status, created_at, updated_at
        FROM assessments
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row.map(Assessment::from))
}

/// 진행 중(in_progress) 상태의 빈 평가를 만듭니다.
pub async fn create_assessment(
    pool: &SqlitePool,
    new: &NewAssessment,
) -> Result<Assessment, AppError> {
    let mut conn = pool.acquire().await?;
    insert_assessment(&mut conn, new).await?;

    fetch_assessment(&mut conn, &new.id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created assessment".to_string()))
}

/// 설문 답변을 채점하고 평가와 답변을 한 트랜잭션으로 저장합니다.
///
/// # 처리 순서
/// 1. 트랜잭션 시작, 평가 행을 in_progress로 삽입
/// 2. 답변이 가리키는 문항들을 같은 트랜잭션에서 조회
/// 3. 순수 채점 함수로 점수 계산 (미존재 문항이면 여기서 중단)
/// 4. 답변 행 삽입, 평가 행을 completed로 갱신
/// 5. 커밋
///
/// 3단계 이후 어디서 실패하든 커밋 전에 함수를 빠져나가므로
/// 평가 행도 답변 행도 남지 않습니다.
pub async fn submit_questionnaire(
    pool: &SqlitePool,
    user_id: &str,
    answers: &[AnswerRequest],
) -> Result<(Assessment, QuestionnaireResult), AppError> {
    let mut tx = pool.begin().await?;

    let new = NewAssessment::questionnaire(user_id);
    insert_assessment(&mut tx, &new).await?;

    let ids: Vec<i64> = answers.iter().map(|a| a.question_id).collect();
    let questions = find_questions_by_ids(&mut tx, &ids).await?;
    let catalog: HashMap<i64, &Question> = questions.iter().map(|q| (q.id, q)).collect();

    let scored = score_submission(answers, |id| catalog.get(&id).copied())?;

    for answer in &scored.answers {
        sqlx::query(
            r#"
            INSERT INTO answers (id, assessment_id, user_id, question_id, answer_value, content, score)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(uuid::Uuid::now_v7().to_string())
        .bind(&new.id)
        .bind(user_id)
        .bind(answer.question_id)
        .bind(answer.answer_value)
        .bind(&answer.content)
        .bind(answer.score)
        .execute(&mut *tx)
        .await?;
    }

    let result = scored.result;
    sqlx::query(
        r#"
        UPDATE assessments
        SET total_score = ?, max_score = ?, level = ?, result = ?, suggestions = ?,
            status = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(result.total_score)
    .bind(result.max_score)
    .bind(result.level)
    .bind(result.description)
    .bind(Json(result.suggestions))
    .bind(AssessmentStatus::Completed)
    .bind(&new.id)
    .execute(&mut *tx)
    .await?;

    let assessment = fetch_assessment(&mut tx, &new.id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve scored assessment".to_string()))?;

    tx.commit().await?;

    Ok((assessment, result))
}

/// 사용자의 가장 최근 완료된 설문 평가를 조회합니다.
///
/// 생성 시각이 같으면 UUIDv7 ID가 큰 쪽(나중에 만든 쪽)을 고릅니다.
pub async fn latest_completed_questionnaire(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Option<Assessment>, AppError> {
    let row = sqlx::query_as::<_, AssessmentRow>(
        r#"
        SELECT id, user_id, title, kind, total_score, max_score, level, result,
               suggestions, status, created_at, updated_at
        FROM assessments
        WHERE user_id = ? AND kind = ? AND status = ?
        ORDER BY created_at DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(AssessmentKind::Questionnaire)
    .bind(AssessmentStatus::Completed)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Assessment::from))
}

/// 사용자의 평가 목록을 최신순으로 한 페이지 조회하고 전체 개수를 함께 반환합니다.
pub async fn list_assessments(
    pool: &SqlitePool,
    user_id: &str,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Assessment>, i64), AppError> {
    let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM assessments WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    let rows = sqlx::query_as::<_, AssessmentRow>(
        r#"
        SELECT id, user_id, title, kind, total_score, max_score, level, result,
               suggestions, status, created_at, updated_at
        FROM assessments
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

    Ok((rows.into_iter().map(Assessment::from).collect(), total))
}

/// 사용자 소유의 평가 하나를 조회합니다. 다른 사용자의 평가는 `None`입니다.
pub async fn get_assessment(
    pool: &SqlitePool,
    user_id: &str,
    id: &str,
) -> Result<Option<Assessment>, AppError> {
    let mut conn = pool.acquire().await?;
    let assessment = fetch_assessment(&mut conn, id).await?;

    Ok(assessment.filter(|a| a.user_id == user_id))
}

/// 평가에 속한 답변들을 저장 순서대로 조회합니다.
pub async fn list_answers(pool: &SqlitePool, assessment_id: &str) -> Result<Vec<Answer>, AppError> {
    let answers = sqlx::query_as::<_, Answer>(
        r#"
        SELECT id, assessment_id, user_id, question_id, answer_value, content, score, created_at
        FROM answers
        WHERE assessment_id = ?
        ORDER BY id ASC
        "#,
    )
    .bind(assessment_id)
    .fetch_all(pool)
    .await?;

    Ok(answers)
}
