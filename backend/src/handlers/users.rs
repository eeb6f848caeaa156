//! Admin user management.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{CreateUser, User, UserResponse},
    repositories::user::UserRepository,
    utils::password,
};

pub async fn list_users(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(_user): Extension<User>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = UserRepository::new().find_all(&pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn create_user(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(admin): Extension<User>,
    Json(payload): Json<CreateUser>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    payload.validate()?;

    let password_hash = password::hash_password(&payload.password)?;
    let user = User::new(
        payload.username,
        password_hash,
        payload.full_name,
        payload.role,
    );
    UserRepository::new().create(&pool, &user).await?;
    tracing::info!(user_id = %user.id, username = %user.username, created_by = %admin.id, "User created");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
