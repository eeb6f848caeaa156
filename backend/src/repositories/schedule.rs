//! Schedule repository.
//!
//! A schedule is an aggregate: the `schedules` row plus its time ranges and
//! weekdays in child tables, written together in one transaction.

use crate::error::AppError;
use crate::models::schedule::{Schedule, ScheduleRow, TimeRange, TimeRangeRow};
use crate::types::{ScheduleId, TimeRangeId};
use sqlx::{PgPool, Postgres, Row, Transaction};

const SELECT_COLUMNS: &str = "id, valid_from, valid_to, created_by, created_at, updated_at";

#[derive(Debug, Default, Clone, Copy)]
pub struct ScheduleRepository;

impl ScheduleRepository {
    pub fn new() -> Self {
        Self
    }

    /// The system holds zero or one current schedule; the newest wins if the
    /// constraint was ever bypassed.
    pub async fn find_current(&self, db: &PgPool) -> Result<Option<Schedule>, AppError> {
        let query = format!(
            "SELECT {} FROM schedules ORDER BY created_at DESC LIMIT 1",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, ScheduleRow>(&query)
            .fetch_optional(db)
            .await?;
        match row {
            Some(row) => Ok(Some(self.assemble(db, row).await?)),
            None => Ok(None),
        }
    }

    pub async fn find_by_id(&self, db: &PgPool, id: ScheduleId) -> Result<Schedule, AppError> {
        let query = format!("SELECT {} FROM schedules WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query_as::<_, ScheduleRow>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Schedule not found".into()))?;
        self.assemble(db, row).await
    }

    pub async fn exists(&self, db: &PgPool) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM schedules")
            .fetch_one(db)
            .await?;
        Ok(row.get::<i64, _>("count") > 0)
    }

    pub async fn create(&self, db: &PgPool, schedule: &Schedule) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        sqlx::query(
            "INSERT INTO schedules (id, valid_from, valid_to, created_by, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(schedule.id)
        .bind(schedule.valid_from)
        .bind(schedule.valid_to)
        .bind(schedule.created_by)
        .bind(schedule.created_at)
        .bind(schedule.updated_at)
        .execute(&mut *tx)
        .await?;

        Self::insert_children(&mut tx, schedule.id, &schedule.time_ranges, &schedule.days)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn update(&self, db: &PgPool, schedule: &Schedule) -> Result<(), AppError> {
        let mut tx = db.begin().await?;

        let result = sqlx::query(
            "UPDATE schedules SET valid_from = $2, valid_to = $3, updated_at = $4 WHERE id = $1",
        )
        .bind(schedule.id)
        .bind(schedule.valid_from)
        .bind(schedule.valid_to)
        .bind(schedule.updated_at)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Schedule not found".into()));
        }

        sqlx::query("DELETE FROM schedule_time_ranges WHERE schedule_id = $1")
            .bind(schedule.id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM schedule_days WHERE schedule_id = $1")
            .bind(schedule.id)
            .execute(&mut *tx)
            .await?;

        Self::insert_children(&mut tx, schedule.id, &schedule.time_ranges, &schedule.days)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn delete(&self, db: &PgPool, id: ScheduleId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Schedule not found".into()));
        }
        Ok(())
    }

    async fn insert_children(
        tx: &mut Transaction<'_, Postgres>,
        schedule_id: ScheduleId,
        time_ranges: &[TimeRange],
        days: &[u8],
    ) -> Result<(), AppError> {
        for (position, range) in time_ranges.iter().enumerate() {
            sqlx::query(
                "INSERT INTO schedule_time_ranges (id, schedule_id, start_time, end_time, position) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(TimeRangeId::new())
            .bind(schedule_id)
            .bind(range.start)
            .bind(range.end)
            .bind(position as i16)
            .execute(&mut **tx)
            .await?;
        }

        for day in days {
            sqlx::query("INSERT INTO schedule_days (schedule_id, weekday) VALUES ($1, $2)")
                .bind(schedule_id)
                .bind(*day as i16)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    async fn assemble(&self, db: &PgPool, row: ScheduleRow) -> Result<Schedule, AppError> {
        let range_rows = sqlx::query_as::<_, TimeRangeRow>(
            "SELECT id, schedule_id, start_time, end_time, position \
             FROM schedule_time_ranges WHERE schedule_id = $1 ORDER BY position",
        )
        .bind(row.id)
        .fetch_all(db)
        .await?;

        let day_rows =
            sqlx::query("SELECT weekday FROM schedule_days WHERE schedule_id = $1 ORDER BY weekday")
                .bind(row.id)
                .fetch_all(db)
                .await?;

        Ok(Schedule {
            id: row.id,
            time_ranges: range_rows.iter().map(TimeRange::from).collect(),
            days: day_rows
                .iter()
                .map(|day| day.get::<i16, _>("weekday") as u8)
                .collect(),
            valid_from: row.valid_from,
            valid_to: row.valid_to,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
