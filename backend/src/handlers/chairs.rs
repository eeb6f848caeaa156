//! Chair inventory: public listing for the booking flow, full CRUD for
//! admins.

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
        chair::{Chair, ChairResponse, CreateChairPayload, UpdateChairPayload},
        user::User,
    },
    repositories::{chair::ChairRepository, repository::Repository},
    types::ChairId,
    utils::time,
};

/// Chairs a user can book: active only.
pub async fn list_chairs(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(_user): Extension<User>,
) -> Result<Json<Vec<ChairResponse>>, AppError> {
    let chairs = ChairRepository::new().find_active(&pool).await?;
    Ok(Json(chairs.into_iter().map(ChairResponse::from).collect()))
}

/// Admin view: every chair regardless of status.
pub async fn admin_list_chairs(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(_user): Extension<User>,
) -> Result<Json<Vec<ChairResponse>>, AppError> {
    let chairs = ChairRepository::new().find_all(&pool).await?;
    Ok(Json(chairs.into_iter().map(ChairResponse::from).collect()))
}

pub async fn create_chair(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(_user): Extension<User>,
    Json(payload): Json<CreateChairPayload>,
) -> Result<(StatusCode, Json<ChairResponse>), AppError> {
    let name = payload.name.trim();
    if name.is_empty() || name.len() > 100 {
        return Err(AppError::Validation(vec![
            "name: chair_name_invalid_length".into(),
        ]));
    }

    let chair = Chair::new(name.to_string(), payload.location, payload.status);
    let created = ChairRepository::new().create(&pool, &chair).await?;
    tracing::info!(chair_id = %created.id, name = %created.name, "Chair created");

    Ok((StatusCode::CREATED, Json(ChairResponse::from(created))))
}

pub async fn update_chair(
    State((pool, config)): State<(PgPool, Config)>,
    Extension(_user): Extension<User>,
    Path(id): Path<ChairId>,
    Json(payload): Json<UpdateChairPayload>,
) -> Result<Json<ChairResponse>, AppError> {
    let repo = ChairRepository::new();
    let mut chair = repo.find_by_id(&pool, id).await?;

    if let Some(name) = payload.name {
        let name = name.trim().to_string();
        if name.is_empty() || name.len() > 100 {
            return Err(AppError::Validation(vec![
                "name: chair_name_invalid_length".into(),
            ]));
        }
        chair.name = name;
    }
    if let Some(location) = payload.location {
        chair.location = Some(location);
    }
    if let Some(status) = payload.status {
        chair.status = status;
    }
    chair.updated_at = time::now_utc(&config.time_zone);

    let updated = repo.update(&pool, &chair).await?;
    Ok(Json(ChairResponse::from(updated)))
}

pub async fn delete_chair(
    State((pool, _config)): State<(PgPool, Config)>,
    Extension(_user): Extension<User>,
    Path(id): Path<ChairId>,
) -> Result<StatusCode, AppError> {
    ChairRepository::new().delete(&pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
