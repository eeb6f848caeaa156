//! User repository.

use sqlx::{PgPool, Row};

use crate::error::AppError;
use crate::models::user::User;
use crate::types::UserId;

const SELECT_COLUMNS: &str = "id, username, password_hash, full_name, role, created_at, updated_at";

#[derive(Debug, Default, Clone, Copy)]
pub struct UserRepository;

impl UserRepository {
    pub fn new() -> Self {
        Self
    }

    fn base_select_query() -> String {
        format!("SELECT {} FROM users", SELECT_COLUMNS)
    }

    pub async fn find_by_id(&self, db: &PgPool, id: UserId) -> Result<Option<User>, AppError> {
        let query = format!("{} WHERE id = $1", Self::base_select_query());
        let row = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    pub async fn find_by_username(
        &self,
        db: &PgPool,
        username: &str,
    ) -> Result<Option<User>, AppError> {
        let query = format!("{} WHERE username = $1", Self::base_select_query());
        let row = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }

    pub async fn find_all(&self, db: &PgPool) -> Result<Vec<User>, AppError> {
        let query = format!("{} ORDER BY username", Self::base_select_query());
        let rows = sqlx::query_as::<_, User>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    pub async fn count(&self, db: &PgPool) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users")
            .fetch_one(db)
            .await?;
        Ok(row.get::<i64, _>("count"))
    }

    pub async fn create(&self, db: &PgPool, user: &User) -> Result<(), AppError> {
        let result = sqlx::query(
            "INSERT INTO users (id, username, password_hash, full_name, role, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err))
                if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                Err(AppError::Conflict("Username is already taken".into()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
