use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, LoginResponse, RefreshRequest, User, UserResponse},
    repositories::{refresh_token::RefreshTokenRepository, user::UserRepository},
    utils::{jwt, password, time},
};

pub async fn login(
    State((pool, config)): State<(PgPool, Config)>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = UserRepository::new()
        .find_by_username(&pool, &payload.username)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".into()))?;

    if !password::verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::Unauthorized(
            "Invalid username or password".into(),
        ));
    }

    let response = issue_tokens(&pool, &config, user).await?;
    Ok(Json(response))
}

pub async fn refresh(
    State((pool, config)): State<(PgPool, Config)>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let (token_id, secret) = jwt::decode_refresh_token(&payload.refresh_token)
        .map_err(|_| AppError::Unauthorized("Invalid or expired refresh token".into()))?;

    let token_repo = RefreshTokenRepository::new();
    let now = time::now_utc(&config.time_zone);

    let stored = token_repo
        .find_by_id(&pool, token_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid or expired refresh token".into()))?;

    if stored.expires_at < now {
        token_repo.delete(&pool, stored.id).await?;
        return Err(AppError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ));
    }

    if !jwt::verify_refresh_secret(&secret, &stored.token_hash)? {
        return Err(AppError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ));
    }

    let user = UserRepository::new()
        .find_by_id(&pool, stored.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".into()))?;

    // Rotate: the presented token is spent regardless of what happens next.
    token_repo.delete(&pool, stored.id).await?;
    token_repo.delete_expired(&pool, now).await?;

    let response = issue_tokens(&pool, &config, user).await?;
    Ok(Json(response))
}

pub async fn logout(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(_user): Extension<User>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<Value>, AppError> {
    if let Ok((token_id, _)) = jwt::decode_refresh_token(&payload.refresh_token) {
        RefreshTokenRepository::new().delete(&pool, token_id).await?;
    }
    Ok(Json(json!({"message": "Logged out"})))
}

pub async fn me(Extension(user): Extension<User>) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(UserResponse::from(user)))
}

async fn issue_tokens(
    pool: &PgPool,
    config: &Config,
    user: User,
) -> Result<LoginResponse, AppError> {
    let access_token = jwt::create_access_token(
        user.id.to_string(),
        user.username.clone(),
        user.role.as_str().to_string(),
        &config.jwt_secret,
        config.jwt_expiration_hours,
    )?;

    let refresh_token = jwt::create_refresh_token(user.id, config.refresh_token_expiration_days)?;
    RefreshTokenRepository::new()
        .create(pool, &refresh_token)
        .await?;

    Ok(LoginResponse {
        access_token,
        refresh_token: refresh_token.encoded(),
        user: UserResponse::from(user),
    })
}
