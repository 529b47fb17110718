//! User domain models and DTOs.

use chrono::{DateTime, Utc};
use cinetrack_auth::{LiveAccount, Role};
use cinetrack_core::PaginationMeta;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A stored account, including its password hash. Never serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: Role,
    pub blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    #[must_use]
    pub fn live_account(&self) -> LiveAccount {
        LiveAccount {
            role: self.role,
            blocked: self.blocked,
        }
    }
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            display_name: record.display_name,
            role: record.role,
            blocked: record.blocked,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Insert payload for a new account. `email` must already be normalized.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: Role,
}

/// Lower-cases and trims an email so lookups are case-insensitive.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleDto {
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedUsersResponse {
    pub data: Vec<User>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UserRecord {
        let now = Utc::now();
        UserRecord {
            id: Uuid::new_v4(),
            email: "viewer@example.com".to_string(),
            display_name: "Viewer".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            role: Role::Staff,
            blocked: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_public_user_has_no_password_hash() {
        let user = User::from(record());
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
        assert!(json.contains(r#""role":"STAFF""#));
    }

    #[test]
    fn test_live_account() {
        let live = record().live_account();
        assert_eq!(live.role, Role::Staff);
        assert!(live.blocked);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Film.Buff@Example.COM "), "film.buff@example.com");
    }

    #[test]
    fn test_update_role_dto_rejects_unknown_role() {
        assert!(serde_json::from_str::<UpdateRoleDto>(r#"{"role":"OWNER"}"#).is_err());
        let dto: UpdateRoleDto = serde_json::from_str(r#"{"role":"STAFF"}"#).unwrap();
        assert_eq!(dto.role, Role::Staff);
    }
}
