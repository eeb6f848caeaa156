use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::types::ChairId;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Chair {
    #[schema(value_type = String)]
    pub id: ChairId,
    pub name: String,
    pub location: Option<String>,
    pub status: ChairStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChairStatus {
    Active,
    Maintenance,
    Inactive,
}

impl Default for ChairStatus {
    fn default() -> Self {
        ChairStatus::Active
    }
}

impl ChairStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChairStatus::Active => "active",
            ChairStatus::Maintenance => "maintenance",
            ChairStatus::Inactive => "inactive",
        }
    }
}

impl Chair {
    pub fn new(name: String, location: Option<String>, status: ChairStatus) -> Self {
        let now = Utc::now();
        Self {
            id: ChairId::new(),
            name,
            location,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Only active chairs take part in slot projection.
    pub fn is_bookable(&self) -> bool {
        matches!(self.status, ChairStatus::Active)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChairPayload {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: ChairStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChairPayload {
    pub name: Option<String>,
    pub location: Option<String>,
    pub status: Option<ChairStatus>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChairResponse {
    #[schema(value_type = String)]
    pub id: ChairId,
    pub name: String,
    pub location: Option<String>,
    pub status: ChairStatus,
}

impl From<Chair> for ChairResponse {
    fn from(chair: Chair) -> Self {
        Self {
            id: chair.id,
            name: chair.name,
            location: chair.location,
            status: chair.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chair_status_serde_snake_case() {
        let s: ChairStatus = serde_json::from_str("\"maintenance\"").unwrap();
        assert_eq!(s, ChairStatus::Maintenance);
        let v = serde_json::to_value(ChairStatus::Active).unwrap();
        assert_eq!(v, serde_json::json!("active"));
    }

    #[test]
    fn only_active_chairs_are_bookable() {
        let mut chair = Chair::new("Lobby 1".into(), None, ChairStatus::Active);
        assert!(chair.is_bookable());
        chair.status = ChairStatus::Maintenance;
        assert!(!chair.is_bookable());
        chair.status = ChairStatus::Inactive;
        assert!(!chair.is_bookable());
    }
}
