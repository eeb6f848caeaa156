//! Weekly schedule administration. The management surface holds zero or one
//! current schedule; creating a second is a conflict.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use sqlx::PgPool;

use crate::{
    config::Config,
    error::AppError,
    models::{
        schedule::{
            normalize_validity_window, CreateSchedulePayload, Schedule, ScheduleResponse,
        },
        user::User,
    },
    repositories::schedule::ScheduleRepository,
    types::ScheduleId,
    utils::time,
    validation::rules,
};

pub async fn get_schedule(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(_user): Extension<User>,
) -> Result<Json<Option<ScheduleResponse>>, AppError> {
    let schedule = ScheduleRepository::new().find_current(&pool).await?;
    Ok(Json(schedule.map(ScheduleResponse::from)))
}

pub async fn create_schedule(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateSchedulePayload>,
) -> Result<(StatusCode, Json<ScheduleResponse>), AppError> {
    rules::validate_schedule_payload(&payload).map_err(AppError::Validation)?;

    let repo = ScheduleRepository::new();
    if repo.exists(&pool).await? {
        return Err(AppError::Conflict(
            "A schedule already exists; update it instead".into(),
        ));
    }

    let (valid_from, valid_to) = normalize_validity_window(payload.valid_from, payload.valid_to);
    let schedule = Schedule::new(
        payload.time_ranges,
        deduplicated_days(payload.day_ids),
        valid_from,
        valid_to,
        user.id,
    );
    repo.create(&pool, &schedule).await?;
    tracing::info!(schedule_id = %schedule.id, created_by = %user.id, "Schedule created");

    Ok((StatusCode::CREATED, Json(ScheduleResponse::from(schedule))))
}

pub async fn update_schedule(
    State((pool, config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
    Path(id): Path<ScheduleId>,
    Json(payload): Json<CreateSchedulePayload>,
) -> Result<Json<ScheduleResponse>, AppError> {
    rules::validate_schedule_payload(&payload).map_err(AppError::Validation)?;

    let repo = ScheduleRepository::new();
    let existing = repo.find_by_id(&pool, id).await?;

    let (valid_from, valid_to) = normalize_validity_window(payload.valid_from, payload.valid_to);
    let schedule = Schedule {
        id: existing.id,
        time_ranges: payload.time_ranges,
        days: deduplicated_days(payload.day_ids),
        valid_from,
        valid_to,
        created_by: existing.created_by,
        created_at: existing.created_at,
        updated_at: time::now_utc(&config.time_zone),
    };
    repo.update(&pool, &schedule).await?;
    tracing::info!(schedule_id = %schedule.id, updated_by = %user.id, "Schedule updated");

    Ok(Json(ScheduleResponse::from(schedule)))
}

pub async fn delete_schedule(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
    Path(id): Path<ScheduleId>,
) -> Result<StatusCode, AppError> {
    ScheduleRepository::new().delete(&pool, id).await?;
    tracing::info!(schedule_id = %id, deleted_by = %user.id, "Schedule deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn deduplicated_days(mut day_ids: Vec<u8>) -> Vec<u8> {
    day_ids.sort_unstable();
    day_ids.dedup();
    day_ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deduplicated_days_sorts_and_removes_repeats() {
        assert_eq!(deduplicated_days(vec![3, 1, 3, 0, 1]), vec![0, 1, 3]);
        assert_eq!(deduplicated_days(vec![]), Vec::<u8>::new());
    }
}
