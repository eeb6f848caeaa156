//! The "list available times" query: per active chair, the partition of the
//! selected date's slots, with server-side chair pagination.

use std::collections::HashMap;

use axum::{
    extract::{Extension, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::{IntoParams, ToSchema};

use crate::{
    config::Config,
    error::AppError,
    models::{appointment::Appointment, user::User, PageInfo, PageQuery},
    repositories::{
        appointment::AppointmentRepository, chair::ChairRepository,
        schedule::ScheduleRepository,
    },
    scheduling::availability::project_availability,
    types::ChairId,
    utils::time,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    /// Date to project; defaults to today in the business timezone.
    pub date: Option<NaiveDate>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChairAvailabilityEntry {
    #[schema(value_type = String)]
    pub chair_id: ChairId,
    pub chair_name: String,
    pub chair_location: Option<String>,
    /// Open slot start times as `HH:MM`, ascending.
    pub available: Vec<String>,
    /// Booked slot start times as `HH:MM`, ascending.
    pub unavailable: Vec<String>,
    pub total_slots: usize,
    pub booked_slots: usize,
    pub available_slots: usize,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityListResponse {
    pub date: NaiveDate,
    pub chairs: Vec<ChairAvailabilityEntry>,
    pub pagination: PageInfo,
}

pub async fn list_availability(
    State((pool, config)): State<(PgPool, Config)>,
    Extension(_user): Extension<User>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityListResponse>, AppError> {
    let tz = &config.time_zone;
    let date = query.date.unwrap_or_else(|| time::today_local(tz));
    let paging = PageQuery {
        page: query.page.unwrap_or(1),
        limit: query.limit.unwrap_or(10),
    };

    let chair_repo = ChairRepository::new();
    let total_items = chair_repo.count_active(&pool).await?;
    let chairs = chair_repo
        .find_active_page(&pool, paging.limit(), paging.offset())
        .await?;

    let schedule = ScheduleRepository::new().find_current(&pool).await?;

    let (day_start, day_end) = time::local_date_range_utc(date, tz);
    let appointments = AppointmentRepository::new()
        .find_occupying_between(&pool, day_start, day_end)
        .await?;
    let mut by_chair: HashMap<ChairId, Vec<Appointment>> = HashMap::new();
    for appointment in appointments {
        by_chair
            .entry(appointment.chair_id)
            .or_default()
            .push(appointment);
    }

    let mut entries = Vec::with_capacity(chairs.len());
    for chair in chairs {
        let chair_appointments = by_chair
            .get(&chair.id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let availability =
            project_availability(&chair, schedule.as_ref(), date, chair_appointments, tz)?;

        entries.push(ChairAvailabilityEntry {
            available: availability
                .available
                .iter()
                .map(|slot| time::format_hhmm(*slot))
                .collect(),
            unavailable: availability
                .unavailable
                .iter()
                .map(|slot| time::format_hhmm(*slot))
                .collect(),
            total_slots: availability.total_slots(),
            booked_slots: availability.unavailable.len(),
            available_slots: availability.available.len(),
            chair_id: chair.id,
            chair_name: chair.name,
            chair_location: chair.location,
        });
    }

    Ok(Json(AvailabilityListResponse {
        date,
        chairs: entries,
        pagination: PageInfo::new(paging.page(), paging.limit(), total_items),
    }))
}
