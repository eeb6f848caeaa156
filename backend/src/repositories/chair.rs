//! Chair repository.
//!
//! CRUD plus the active-chair queries availability projection relies on.

use crate::error::AppError;
use crate::models::chair::{Chair, ChairStatus};
use crate::repositories::repository::Repository;
use crate::types::ChairId;
use sqlx::{PgPool, Row};

const TABLE_NAME: &str = "chairs";
const SELECT_COLUMNS: &str = "id, name, location, status, created_at, updated_at";

#[derive(Debug, Default, Clone, Copy)]
pub struct ChairRepository;

impl ChairRepository {
    pub fn new() -> Self {
        Self
    }

    fn base_select_query() -> String {
        format!("SELECT {} FROM {}", SELECT_COLUMNS, TABLE_NAME)
    }

    /// Active chairs ordered by name.
    pub async fn find_active(&self, db: &PgPool) -> Result<Vec<Chair>, AppError> {
        let query = format!(
            "{} WHERE status = $1 ORDER BY name",
            Self::base_select_query()
        );
        let rows = sqlx::query_as::<_, Chair>(&query)
            .bind(ChairStatus::Active.as_str())
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    /// One page of active chairs, ordered by name for a stable pagination.
    pub async fn find_active_page(
        &self,
        db: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Chair>, AppError> {
        let query = format!(
            "{} WHERE status = $1 ORDER BY name LIMIT $2 OFFSET $3",
            Self::base_select_query()
        );
        let rows = sqlx::query_as::<_, Chair>(&query)
            .bind(ChairStatus::Active.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    pub async fn count_active(&self, db: &PgPool) -> Result<i64, AppError> {
        let row = sqlx::query(&format!(
            "SELECT COUNT(*) AS count FROM {} WHERE status = $1",
            TABLE_NAME
        ))
        .bind(ChairStatus::Active.as_str())
        .fetch_one(db)
        .await?;
        Ok(row.get::<i64, _>("count"))
    }

    pub async fn find_by_id_optional(
        &self,
        db: &PgPool,
        id: ChairId,
    ) -> Result<Option<Chair>, AppError> {
        let query = format!("{} WHERE id = $1", Self::base_select_query());
        let row = sqlx::query_as::<_, Chair>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(row)
    }
}

impl Repository<Chair> for ChairRepository {
    const TABLE: &'static str = TABLE_NAME;
    type Id = ChairId;

    async fn find_all(&self, db: &PgPool) -> Result<Vec<Chair>, AppError> {
        let query = format!("{} ORDER BY name", Self::base_select_query());
        let rows = sqlx::query_as::<_, Chair>(&query).fetch_all(db).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, db: &PgPool, id: ChairId) -> Result<Chair, AppError> {
        let query = format!("{} WHERE id = $1", Self::base_select_query());
        let result = sqlx::query_as::<_, Chair>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Chair not found".into()))?;
        Ok(result)
    }

    async fn create(&self, db: &PgPool, item: &Chair) -> Result<Chair, AppError> {
        let query = format!(
            "INSERT INTO {} (id, name, location, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Chair>(&query)
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.location)
            .bind(item.status.as_str())
            .bind(item.created_at)
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn update(&self, db: &PgPool, item: &Chair) -> Result<Chair, AppError> {
        let query = format!(
            "UPDATE {} SET name = $2, location = $3, status = $4, updated_at = $5 \
             WHERE id = $1 RETURNING {}",
            TABLE_NAME, SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Chair>(&query)
            .bind(item.id)
            .bind(&item.name)
            .bind(&item.location)
            .bind(item.status.as_str())
            .bind(item.updated_at)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    async fn delete(&self, db: &PgPool, id: ChairId) -> Result<(), AppError> {
        let query = format!("DELETE FROM {} WHERE id = $1", TABLE_NAME);
        let result = sqlx::query(&query).bind(id).execute(db).await;

        match result {
            Ok(done) if done.rows_affected() == 0 => {
                Err(AppError::NotFound("Chair not found".into()))
            }
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err))
                if matches!(db_err.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) =>
            {
                Err(AppError::Conflict(
                    "Chair has appointments and cannot be deleted".into(),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }
}
