//! Appointment repository.
//!
//! Inserts rely on the partial unique index over `(chair_id, datetime_start)`
//! for scheduled/confirmed rows: the database, not the eligibility check, has
//! the final word on double-booking.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

use crate::error::AppError;
use crate::models::appointment::{Appointment, AppointmentStatus, StatusFilter};
use crate::types::{AppointmentId, ChairId, UserId};

const SELECT_COLUMNS: &str = "id, user_id, chair_id, datetime_start, datetime_end, status, \
                              presence_confirmed, created_at, updated_at";

/// Filters for appointment listings. `now` anchors the derived completed
/// status so filtering matches what responses will show.
#[derive(Debug, Clone)]
pub struct AppointmentFilters {
    pub user_id: Option<UserId>,
    pub chair_id: Option<ChairId>,
    pub window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub status: StatusFilter,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AppointmentRepository;

impl AppointmentRepository {
    pub fn new() -> Self {
        Self
    }

    fn base_select_query() -> String {
        format!("SELECT {} FROM appointments", SELECT_COLUMNS)
    }

    pub async fn find_by_id(
        &self,
        db: &PgPool,
        id: AppointmentId,
    ) -> Result<Appointment, AppError> {
        let query = format!("{} WHERE id = $1", Self::base_select_query());
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Appointment not found".into()))
    }

    /// Every appointment a user holds, newest start first. The eligibility
    /// check scans the full set, so no status filter is applied here.
    pub async fn find_for_user(
        &self,
        db: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<Appointment>, AppError> {
        let query = format!(
            "{} WHERE user_id = $1 ORDER BY datetime_start DESC",
            Self::base_select_query()
        );
        let rows = sqlx::query_as::<_, Appointment>(&query)
            .bind(user_id)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    /// Slot-holding appointments (scheduled or confirmed) across all chairs
    /// whose start falls in `[from, to)`.
    pub async fn find_occupying_between(
        &self,
        db: &PgPool,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppError> {
        let query = format!(
            "{} WHERE status IN ($1, $2) AND datetime_start >= $3 AND datetime_start < $4 \
             ORDER BY datetime_start",
            Self::base_select_query()
        );
        let rows = sqlx::query_as::<_, Appointment>(&query)
            .bind(AppointmentStatus::Scheduled.as_str())
            .bind(AppointmentStatus::Confirmed.as_str())
            .bind(from)
            .bind(to)
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    pub async fn create(&self, db: &PgPool, appointment: &Appointment) -> Result<(), AppError> {
        let result = sqlx::query(
            "INSERT INTO appointments (id, user_id, chair_id, datetime_start, datetime_end, \
             status, presence_confirmed, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(appointment.id)
        .bind(appointment.user_id)
        .bind(appointment.chair_id)
        .bind(appointment.datetime_start)
        .bind(appointment.datetime_end)
        .bind(appointment.status.as_str())
        .bind(appointment.presence_confirmed)
        .bind(appointment.created_at)
        .bind(appointment.updated_at)
        .execute(db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err))
                if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
            {
                Err(AppError::Conflict(
                    "This slot has just been booked by someone else".into(),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn mark_cancelled(
        &self,
        db: &PgPool,
        id: AppointmentId,
        now: DateTime<Utc>,
    ) -> Result<Appointment, AppError> {
        let query = format!(
            "UPDATE appointments SET status = $2, updated_at = $3 WHERE id = $1 RETURNING {}",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(AppointmentStatus::Cancelled.as_str())
            .bind(now)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    pub async fn mark_confirmed(
        &self,
        db: &PgPool,
        id: AppointmentId,
        now: DateTime<Utc>,
    ) -> Result<Appointment, AppError> {
        let query = format!(
            "UPDATE appointments SET status = $2, presence_confirmed = TRUE, updated_at = $3 \
             WHERE id = $1 RETURNING {}",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(AppointmentStatus::Confirmed.as_str())
            .bind(now)
            .fetch_one(db)
            .await?;
        Ok(row)
    }

    pub async fn list_filtered(
        &self,
        db: &PgPool,
        filters: &AppointmentFilters,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Appointment>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(Self::base_select_query());
        Self::push_filters(&mut builder, filters);
        builder.push(" ORDER BY datetime_start DESC");
        builder.push(" LIMIT ").push_bind(limit);
        builder.push(" OFFSET ").push_bind(offset);

        let rows = builder
            .build_query_as::<Appointment>()
            .fetch_all(db)
            .await?;
        Ok(rows)
    }

    pub async fn count_filtered(
        &self,
        db: &PgPool,
        filters: &AppointmentFilters,
    ) -> Result<i64, AppError> {
        let mut builder =
            QueryBuilder::<Postgres>::new("SELECT COUNT(*) AS count FROM appointments");
        Self::push_filters(&mut builder, filters);

        let row = builder.build().fetch_one(db).await?;
        Ok(row.get::<i64, _>("count"))
    }

    fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &AppointmentFilters) {
        let mut has_clause = false;

        if let Some(user_id) = filters.user_id {
            Self::push_clause(builder, &mut has_clause);
            builder.push("user_id = ").push_bind(user_id);
        }
        if let Some(chair_id) = filters.chair_id {
            Self::push_clause(builder, &mut has_clause);
            builder.push("chair_id = ").push_bind(chair_id);
        }
        if let Some((from, to)) = filters.window {
            Self::push_clause(builder, &mut has_clause);
            builder.push("datetime_start >= ").push_bind(from);
            builder.push(" AND datetime_start < ").push_bind(to);
        }

        // Status filters follow the effective status responses will show:
        // confirmed appointments past their end time read as completed.
        match filters.status {
            StatusFilter::All => {}
            StatusFilter::Scheduled => {
                Self::push_clause(builder, &mut has_clause);
                builder
                    .push("status = ")
                    .push_bind(AppointmentStatus::Scheduled.as_str());
            }
            StatusFilter::Confirmed => {
                Self::push_clause(builder, &mut has_clause);
                builder
                    .push("status = ")
                    .push_bind(AppointmentStatus::Confirmed.as_str());
                builder.push(" AND datetime_end >= ").push_bind(filters.now);
            }
            StatusFilter::Cancelled => {
                Self::push_clause(builder, &mut has_clause);
                builder
                    .push("status = ")
                    .push_bind(AppointmentStatus::Cancelled.as_str());
            }
            StatusFilter::Completed => {
                Self::push_clause(builder, &mut has_clause);
                builder
                    .push("(status = ")
                    .push_bind(AppointmentStatus::Completed.as_str());
                builder
                    .push(" OR (status = ")
                    .push_bind(AppointmentStatus::Confirmed.as_str());
                builder.push(" AND datetime_end < ").push_bind(filters.now);
                builder.push("))");
            }
        }
    }

    fn push_clause(builder: &mut QueryBuilder<'_, Postgres>, has_clause: &mut bool) {
        if *has_clause {
            builder.push(" AND ");
        } else {
            builder.push(" WHERE ");
            *has_clause = true;
        }
    }
}
