use crate::error::AppError;
use crate::models::user::User;
use sqlx::SqlitePool;

pub struct NewUser<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub age: i64,
    pub gender: &'a str,
    pub phone: Option<&'a str>,
}

pub async fn create_user(pool: &SqlitePool, new: &NewUser<'_>) -> Result<User, AppError> {
    sqlx::query(
        r#"
        INSERT INTO users (id, username, email, password_hash, age, gender, phone)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(new.id)
    .bind(new.username)
    .bind(new.email)
    .bind(new.password_hash)
    .bind(new.age)
    .bind(new.gender)
    .bind(new.phone)
    .execute(pool)
    .await?;

    find_by_id(pool, new.id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created user".to_string()))
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, age, gender, phone, avatar,
               status, created_at, updated_at
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, age, gender, phone, avatar,
               status, created_at, updated_at
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Login accepts either identifier; usernames win when both would match.
pub async fn find_by_login(pool: &SqlitePool, login: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, age, gender, phone, avatar,
               status, created_at, updated_at
        FROM users
        WHERE username = ? OR email = ?
        ORDER BY username = ? DESC
        LIMIT 1
        "#,
    )
    .bind(login)
    .bind(login)
    .bind(login)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, age, gender, phone, avatar,
               status, created_at, updated_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn store_refresh_token(
    pool: &SqlitePool,
    id: &str,
    user_id: &str,
    token_hash: &str,
    expires_at: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO refresh_tokens (id, user_id, token_hash, expires_at)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(token_hash)
    .bind(expires_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Returns `(id, user_id, expires_at)` for a stored token hash.
pub async fn find_refresh_token(
    pool: &SqlitePool,
    token_hash: &str,
) -> Result<Option<(String, String, String)>, AppError> {
    let row = sqlx::query_as::<_, (String, String, String)>(
        r#"
        SELECT id, user_id, expires_at
        FROM refresh_tokens
        WHERE token_hash = ?
        "#,
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete_refresh_token(pool: &SqlitePool, token_hash: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM refresh_tokens WHERE token_hash = ?")
        .bind(token_hash)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn delete_user_refresh_tokens(pool: &SqlitePool, user_id: &str) -> Result<(), AppError> {
    sqlx::query("DELETE FROM refresh_tokens WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}
