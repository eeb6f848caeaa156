//! Appointment booking, cancellation, and confirmation.
//!
//! Every mutation runs the pure eligibility checks first and still defers to
//! the database for the race-sensitive slot-uniqueness guarantee.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::{IntoParams, ToSchema};

use crate::{
    config::Config,
    error::AppError,
    models::{
        appointment::{
            Appointment, AppointmentResponse, AppointmentStatus, CreateAppointmentRequest,
            StatusFilter,
        },
        user::User,
        PageInfo, PageQuery,
    },
    repositories::{
        appointment::{AppointmentFilters, AppointmentRepository},
        chair::ChairRepository,
        schedule::ScheduleRepository,
    },
    scheduling::{eligibility, slots, validity},
    types::AppointmentId,
    utils::time,
};

pub async fn create_appointment(
    State((pool, config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<AppointmentResponse>), AppError> {
    let tz = &config.time_zone;
    let now = time::now_utc(tz);
    let local_start = payload.datetime_start.with_timezone(tz);
    let date = local_start.date_naive();
    let slot_time = local_start.time();

    let chair = ChairRepository::new()
        .find_by_id_optional(&pool, payload.chair_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Chair not found".into()))?;
    if !chair.is_bookable() {
        return Err(AppError::Ineligible(
            "This chair is not currently bookable".into(),
        ));
    }

    let schedule = ScheduleRepository::new()
        .find_current(&pool)
        .await?
        .ok_or_else(|| AppError::Ineligible("No booking schedule is configured".into()))?;
    if !validity::applies_to_date(&schedule, date) {
        return Err(AppError::Ineligible(
            "Bookings are not offered on the requested date".into(),
        ));
    }

    let mut is_candidate = false;
    for range in &schedule.time_ranges {
        if slots::generate_slots(range.start, range.end)?.contains(&slot_time) {
            is_candidate = true;
            break;
        }
    }
    if !is_candidate {
        return Err(AppError::Ineligible(
            "The requested time is not a bookable slot".into(),
        ));
    }

    let existing = AppointmentRepository::new()
        .find_for_user(&pool, user.id)
        .await?;
    let decision = eligibility::can_create(&existing, now);
    if let Some(reason) = decision.reason {
        return Err(AppError::Ineligible(reason.message().into()));
    }

    let appointment = Appointment::new(user.id, payload.chair_id, payload.datetime_start, now);
    AppointmentRepository::new().create(&pool, &appointment).await?;
    tracing::info!(
        appointment_id = %appointment.id,
        chair_id = %appointment.chair_id,
        user_id = %user.id,
        start = %appointment.datetime_start,
        "Appointment booked"
    );

    Ok((
        StatusCode::CREATED,
        Json(AppointmentResponse::from_appointment(appointment, now)),
    ))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MyAppointmentsQuery {
    pub status: Option<StatusFilter>,
}

pub async fn my_appointments(
    State((pool, config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
    Query(query): Query<MyAppointmentsQuery>,
) -> Result<Json<Vec<AppointmentResponse>>, AppError> {
    let now = time::now_utc(&config.time_zone);
    let filter = query.status.unwrap_or_default();

    let appointments = AppointmentRepository::new()
        .find_for_user(&pool, user.id)
        .await?;

    let responses = appointments
        .into_iter()
        .map(|appointment| AppointmentResponse::from_appointment(appointment, now))
        .filter(|response| matches_filter(response.status, filter))
        .collect();

    Ok(Json(responses))
}

pub async fn cancel_appointment(
    State((pool, config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
    Path(id): Path<AppointmentId>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let now = time::now_utc(&config.time_zone);
    let repo = AppointmentRepository::new();
    let appointment = repo.find_by_id(&pool, id).await?;

    if user.is_admin() {
        // Administrative override: no lead-time requirement, but terminal
        // appointments stay terminal.
        if !appointment.status.occupies_slot() {
            return Err(AppError::Ineligible(
                eligibility::CancelDenial::WrongStatus(appointment.status).message(),
            ));
        }
    } else {
        if appointment.user_id != user.id {
            return Err(AppError::Forbidden("Forbidden".into()));
        }
        eligibility::check_cancel(&appointment, now)
            .map_err(|denial| AppError::Ineligible(denial.message()))?;
    }

    let cancelled = repo.mark_cancelled(&pool, appointment.id, now).await?;
    tracing::info!(appointment_id = %cancelled.id, user_id = %user.id, "Appointment cancelled");

    Ok(Json(AppointmentResponse::from_appointment(cancelled, now)))
}

pub async fn confirm_appointment(
    State((pool, config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
    Path(id): Path<AppointmentId>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let now = time::now_utc(&config.time_zone);
    let repo = AppointmentRepository::new();
    let appointment = repo.find_by_id(&pool, id).await?;

    if !eligibility::can_confirm(&appointment) {
        return Err(AppError::Ineligible(format!(
            "A {} appointment cannot be confirmed",
            appointment.status.as_str()
        )));
    }

    let confirmed = repo.mark_confirmed(&pool, appointment.id, now).await?;
    tracing::info!(appointment_id = %confirmed.id, confirmed_by = %user.id, "Appointment confirmed");

    Ok(Json(AppointmentResponse::from_appointment(confirmed, now)))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AppointmentListQuery {
    pub date: Option<NaiveDate>,
    pub status: Option<StatusFilter>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentListResponse {
    pub appointments: Vec<AppointmentResponse>,
    pub pagination: PageInfo,
}

/// Attendant/admin view over all appointments.
pub async fn list_appointments(
    State((pool, config)): State<(PgPool, Config)>,
    Extension(user): Extension<User>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<Json<AppointmentListResponse>, AppError> {
    if !user.is_attendant() {
        return Err(AppError::Forbidden("Forbidden".into()));
    }

    let tz = &config.time_zone;
    let now = time::now_utc(tz);
    let paging = PageQuery {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(10),
    };

    let filters = AppointmentFilters {
        user_id: None,
        chair_id: None,
        window: query.date.map(|date| time::local_date_range_utc(date, tz)),
        status: query.status.unwrap_or_default(),
        now,
    };

    let repo = AppointmentRepository::new();
    let total_items = repo.count_filtered(&pool, &filters).await?;
    let appointments = repo
        .list_filtered(&pool, &filters, paging.limit(), paging.offset())
        .await?;

    Ok(Json(AppointmentListResponse {
        appointments: appointments
            .into_iter()
            .map(|appointment| AppointmentResponse::from_appointment(appointment, now))
            .collect(),
        pagination: PageInfo::new(paging.page(), paging.limit(), total_items),
    }))
}

fn matches_filter(status: AppointmentStatus, filter: StatusFilter) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::Scheduled => status == AppointmentStatus::Scheduled,
        StatusFilter::Confirmed => status == AppointmentStatus::Confirmed,
        StatusFilter::Cancelled => status == AppointmentStatus::Cancelled,
        StatusFilter::Completed => status == AppointmentStatus::Completed,
    }
}
