//! Roles and access-token claims.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Account role.
///
/// Roles are compared by exact match or explicit membership in an allow-list.
/// There is no ordering between them: `Admin` is not implicitly `Staff`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Staff,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::User, Role::Staff, Role::Admin];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Staff => "STAFF",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "STAFF" => Ok(Role::Staff),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Claims embedded in an access token.
///
/// - `sub`: user id (UUID string)
/// - `role`: role at issuance time
/// - `iat` / `exp`: Unix timestamps in seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""ADMIN""#);
        let role: Role = serde_json::from_str(r#""STAFF""#).unwrap();
        assert_eq!(role, Role::Staff);
        assert!(serde_json::from_str::<Role>(r#""superuser""#).is_err());
    }

    #[test]
    fn test_role_from_str_is_case_insensitive() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" Staff ".parse::<Role>().unwrap(), Role::Staff);
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_display_matches_wire_format() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role));
        }
    }

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"sub":"0b3c1f1e-0000-4000-8000-000000000001","role":"USER","iat":100,"exp":200}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.exp, 200);
    }

    #[test]
    fn test_claims_require_role() {
        let json = r#"{"sub":"abc","iat":100,"exp":200}"#;
        assert!(serde_json::from_str::<Claims>(json).is_err());
    }
}
