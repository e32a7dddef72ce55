//! # 설문 문항 쿼리 모듈
//!
//! `questions` 테이블은 마이그레이션으로 채워지는 읽기 전용 카탈로그입니다.
//! DB 행(`QuestionRow`)을 읽은 직후 `Question`으로 변환하므로
//! options JSON 문자열은 이 모듈 밖으로 나가지 않습니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

/// 필터 조건에 맞는 문항 목록을 표시 순서(order_num, id)대로 조회합니다.
///
/// # 매개변수
/// - `filter.category`: 지정하면 해당 분류만
/// - `filter.enabled`: 지정하면 활성/비활성 여부로 거름
///
/// SQL의 `? IS NULL OR ...` 패턴으로 "값이 없으면 조건 무시"를 표현합니다.
/// 같은 값을 두 번 바인딩하는 이유는 `?` 자리표시자가 두 개이기 때문입니다.
pub async fn list_questions(
    pool: &SqlitePool,
    filter: &QuestionFilter,
) -> Result<Vec<Question>, AppError> {
    let rows = sqlx::query_as::<_, QuestionRow>(
        r#"
        SELECT id, title, description, question_type, category, options,
               weight, order_num, enabled, created_at, updated_at
        FROM questions
        WHERE (? IS NULL OR category = ?)
          AND (? IS NULL OR enabled = ?)
        ORDER BY order_num ASC, id ASC
        "#,
    )
    .bind(filter.category.as_deref())
    .bind(filter.category.as_deref())
    .bind(filter.enabled)
    .bind(filter.enabled)
    .fetch_all(pool)
    .await?;

    // TryFrom 변환 중 하나라도 실패하면 전체가 에러가 됩니다.
    rows.into_iter().map(Question::try_from).collect()
}

/// ID로 단일 문항을 조회합니다. 없으면 `Ok(None)`.
pub async fn get_question(pool: &SqlitePool, id: i64) -> Result<Option<Question>, AppError> {
    let row = sqlx::query_as::<_, QuestionRow>(
        r#"
        SELECT id, title, description, question_type, category, options,
               weight, order_num, enabled, created_at, updated_at
        FROM questions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Question::try_from).transpose()
}

/// 여러 ID의 문항을 한 번에 조회합니다. 존재하지 않는 ID는 결과에서 빠집니다.
///
/// 제출 트랜잭션 안에서 호출되므로 풀(pool)이 아닌 커넥션을 받습니다.
pub async fn find_questions_by_ids(
    conn: &mut SqliteConnection,
    ids: &[i64],
) -> Result<Vec<Question>, AppError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    // 중복 ID는 한 번만 바인딩합니다.
    let mut unique = ids.to_vec();
    unique.sort_unstable();
    unique.dedup();

    let mut builder = QueryBuilder::<Sqlite>::new(
        r#"
        SELECT id, title, description, question_type, category, options,
               weight, order_num, enabled, created_at, updated_at
        FROM questions
        WHERE id IN ("#,
    );
    let mut separated = builder.separated(", ");
    for id in &unique {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");

    let rows = builder
        .build_query_as::<QuestionRow>()
        .fetch_all(&mut *conn)
        .await?;

    rows.into_iter().map(Question::try_from).collect()
}
