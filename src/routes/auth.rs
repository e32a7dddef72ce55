use crate::{
    db::users::{self as db_users, NewUser},
    error::AppError,
    middleware::auth::{
        create_access_token, create_refresh_token, hash_token, verify_token, AuthUser, TokenKind,
        REFRESH_TOKEN_DAYS,
    },
    models::{user::*, ApiResponse},
    state::AppState,
};
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, Json};
use chrono::{Duration, Utc};
use rand_core::OsRng;

const EXPIRES_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

/// Mint an access/refresh pair and persist the refresh token's hash.
async fn issue_tokens(state: &AppState, user: User) -> Result<AuthResponse, AppError> {
    let secret = &state.config.jwt_secret;
    let access_token = create_access_token(&user.id, secret)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;
    let refresh_token = create_refresh_token(&user.id, secret)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

    let token_id = uuid::Uuid::now_v7().to_string();
    let expires_at = (Utc::now() + Duration::days(REFRESH_TOKEN_DAYS))
        .format(EXPIRES_AT_FORMAT)
        .to_string();
    db_users::store_refresh_token(
        &state.pool,
        &token_id,
        &user.id,
        &hash_token(&refresh_token),
        &expires_at,
    )
    .await?;

    Ok(AuthResponse {
        user: user.into(),
        access_token,
        refresh_token,
    })
}

fn ensure_active(user: &User) -> Result<(), AppError> {
    match user.status {
        UserStatus::Active => Ok(()),
        UserStatus::Disabled => Err(AppError::Forbidden("Account has been disabled".to_string())),
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let username = req.username.trim();
    let email = req.email.trim();

    // Validate input
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(AppError::InvalidInput(format!(
            "Username must be at least {MIN_USERNAME_LEN} characters"
        )));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if !email.contains('@') {
        return Err(AppError::InvalidInput("Invalid email address".to_string()));
    }
    if matches!(req.age, Some(age) if !(0..=150).contains(&age)) {
        return Err(AppError::InvalidInput("Age must be between 0 and 150".to_string()));
    }

    if db_users::find_by_username(&state.pool, username).await?.is_some() {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }
    if db_users::find_by_email(&state.pool, email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    let user_id = uuid::Uuid::now_v7().to_string();
    let user = db_users::create_user(
        &state.pool,
        &NewUser {
            id: &user_id,
            username,
            email,
            password_hash: &password_hash,
            age: req.age.unwrap_or(0),
            gender: req.gender.as_deref().unwrap_or(""),
            phone: req.phone.as_deref(),
        },
    )
    .await?;
    tracing::info!(user_id = %user.id, "Registered user {}", user.username);

    let auth = issue_tokens(&state, user).await?;
    Ok(Json(ApiResponse::with_message("Registration successful", auth)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let user = db_users::find_by_login(&state.pool, req.username.trim())
        .await?
        .ok_or(AppError::Unauthorized("Invalid username or password".to_string()))?;

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|e| AppError::Internal(format!("Password hash parse error: {}", e)))?;
    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Unauthorized("Invalid username or password".to_string()))?;

    // Checked after the password so disabled accounts are not enumerable
    ensure_active(&user)?;

    let auth = issue_tokens(&state, user).await?;
    Ok(Json(ApiResponse::with_message("Login successful", auth)))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    verify_token(&req.refresh_token, TokenKind::Refresh, &state.config.jwt_secret)
        .map_err(|_| AppError::Unauthorized("Invalid refresh token".to_string()))?;

    let token_hash = hash_token(&req.refresh_token);
    let (_token_id, user_id, expires_at) = db_users::find_refresh_token(&state.pool, &token_hash)
        .await?
        .ok_or(AppError::Unauthorized("Refresh token not found or revoked".to_string()))?;

    let expires = chrono::NaiveDateTime::parse_from_str(&expires_at, EXPIRES_AT_FORMAT)
        .map_err(|e| AppError::Internal(format!("Date parse error: {}", e)))?;
    if expires.and_utc() < Utc::now() {
        db_users::delete_refresh_token(&state.pool, &token_hash).await?;
        return Err(AppError::Unauthorized("Refresh token expired".to_string()));
    }

    let user = db_users::find_by_id(&state.pool, &user_id)
        .await?
        .ok_or(AppError::Unauthorized("User not found".to_string()))?;
    ensure_active(&user)?;

    // Rotate: the presented token can be used only once
    db_users::delete_refresh_token(&state.pool, &token_hash).await?;

    let auth = issue_tokens(&state, user).await?;
    Ok(Json(ApiResponse::success(auth)))
}

pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ApiResponse<()>>, AppError> {
    db_users::delete_user_refresh_tokens(&state.pool, &auth_user.user_id).await?;

    Ok(Json(ApiResponse::with_message("Logged out successfully", ())))
}

pub async fn profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = db_users::find_by_id(&state.pool, &auth_user.user_id)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(ApiResponse::success(user.into())))
}
