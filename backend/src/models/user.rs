//! Models that represent user accounts, authentication payloads, and roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::types::UserId;
use crate::validation::rules;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
/// Database representation of an authenticated user account.
pub struct User {
    /// Unique identifier for the user.
    #[schema(value_type = String)]
    pub id: UserId,
    /// Immutable username used for login.
    pub username: String,
    /// Argon2 hash of the user's password.
    pub password_hash: String,
    /// Human-readable full name.
    pub full_name: String,
    /// Role describing the user's privileges.
    pub role: UserRole,
    /// Creation timestamp for auditing.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp for auditing.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, ToSchema, Default)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
/// Supported user roles stored in the database.
pub enum UserRole {
    /// Standard role: book, view, and cancel own appointments.
    #[default]
    User,
    /// Attendant role: additionally confirms presence for appointments.
    Attendant,
    /// Administrator role: manages chairs, schedules, and users.
    Admin,
}

impl UserRole {
    /// Returns the canonical snake_case representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Attendant => "attendant",
            UserRole::Admin => "admin",
        }
    }
}

impl Serialize for UserRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            // primary canonical values (snake_case)
            "user" => Ok(UserRole::User),
            "attendant" => Ok(UserRole::Attendant),
            "admin" => Ok(UserRole::Admin),
            // tolerate common legacy casings
            "User" | "USER" => Ok(UserRole::User),
            "Attendant" | "ATTENDANT" => Ok(UserRole::Attendant),
            "Admin" | "ADMIN" => Ok(UserRole::Admin),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["user", "attendant", "admin"],
            )),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
/// Payload for creating a new user account.
pub struct CreateUser {
    #[validate(custom(function = rules::validate_username))]
    pub username: String,
    #[validate(custom(function = rules::validate_password_strength))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
/// Credentials submitted by a user attempting to authenticate.
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Payload carrying the refresh token to rotate.
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Authentication tokens returned after a successful login.
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Public-facing representation of a user returned by the API.
pub struct UserResponse {
    #[schema(value_type = String)]
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            role: user.role.as_str().to_string(),
        }
    }
}

impl User {
    /// Constructs a new user with freshly generated identifiers.
    pub fn new(username: String, password_hash: String, full_name: String, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            password_hash,
            full_name,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns `true` when the user holds the `Admin` role.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// Returns `true` when the user may confirm appointments.
    pub fn is_attendant(&self) -> bool {
        matches!(self.role, UserRole::Attendant | UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn user_role_serde_accepts_and_emits_snake_case() {
        let u: UserRole = serde_json::from_str("\"user\"").unwrap();
        let a: UserRole = serde_json::from_str("\"attendant\"").unwrap();
        assert!(matches!(u, UserRole::User));
        assert!(matches!(a, UserRole::Attendant));

        // Tolerate legacy casings
        let a2: UserRole = serde_json::from_str("\"ADMIN\"").unwrap();
        assert!(matches!(a2, UserRole::Admin));

        let sa = serde_json::to_value(UserRole::Admin).unwrap();
        assert_eq!(sa, Value::String("admin".into()));
    }

    #[test]
    fn user_response_role_is_snake_case_string() {
        let user = User::new(
            "alice".to_string(),
            "hash".to_string(),
            "Alice Example".to_string(),
            UserRole::Attendant,
        );
        let resp: UserResponse = user.into();
        assert_eq!(resp.role, "attendant");
    }

    #[test]
    fn attendant_check_includes_admins() {
        let mut user = User::new("a".into(), "h".into(), "A".into(), UserRole::User);
        assert!(!user.is_attendant());
        user.role = UserRole::Attendant;
        assert!(user.is_attendant() && !user.is_admin());
        user.role = UserRole::Admin;
        assert!(user.is_attendant() && user.is_admin());
    }
}
