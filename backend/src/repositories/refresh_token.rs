//! Refresh token repository. Only the argon2 hash of a token's secret is
//! stored; the raw secret exists client-side only.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::types::{RefreshTokenId, UserId};
use crate::utils::jwt::RefreshTokenData;

#[derive(Debug, Clone, FromRow)]
pub struct StoredRefreshToken {
    pub id: RefreshTokenId,
    pub user_id: UserId,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RefreshTokenRepository;

impl RefreshTokenRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create(&self, db: &PgPool, token: &RefreshTokenData) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO refresh_tokens (id, user_id, token_hash, expires_at, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(token.id)
        .bind(token.user_id)
        .bind(&token.token_hash)
        .bind(token.expires_at)
        .bind(Utc::now())
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(
        &self,
        db: &PgPool,
        id: RefreshTokenId,
    ) -> Result<Option<StoredRefreshToken>, AppError> {
        let row = sqlx::query_as::<_, StoredRefreshToken>(
            "SELECT id, user_id, token_hash, expires_at FROM refresh_tokens WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn delete(&self, db: &PgPool, id: RefreshTokenId) -> Result<(), AppError> {
        sqlx::query("DELETE FROM refresh_tokens WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// Drops tokens whose expiry has passed; called opportunistically.
    pub async fn delete_expired(&self, db: &PgPool, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < $1")
            .bind(now)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
