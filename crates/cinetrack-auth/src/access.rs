//! Authorization decisions.
//!
//! Three strictness levels guard the route surface:
//!
//! - [`AccessLevel::Authenticated`]: any valid credential
//! - [`AccessLevel::Exact`]: the caller's role equals one required role
//! - [`AccessLevel::AnyOf`]: the caller's role is in an explicit allow-list,
//!   checked against the live account rather than the token
//!
//! Everything in this module is pure. Reading the live account is the
//! caller's job; the result is passed in as a [`LiveAccount`].

use cinetrack_config::AccessConfig;
use cinetrack_core::{AppError, ErrorKind};
use serde_json::json;

use crate::claims::{Claims, Role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessLevel {
    Authenticated,
    Exact(Role),
    AnyOf(Vec<Role>),
}

impl AccessLevel {
    #[must_use]
    pub fn admin() -> Self {
        AccessLevel::Exact(Role::Admin)
    }

    #[must_use]
    pub fn any_of(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut list: Vec<Role> = Vec::new();
        for role in roles {
            if !list.contains(&role) {
                list.push(role);
            }
        }
        AccessLevel::AnyOf(list)
    }

    /// The staff allow-list from configuration. Unknown role names are
    /// dropped, so a misconfigured list can only narrow access.
    #[must_use]
    pub fn staff(config: &AccessConfig) -> Self {
        Self::any_of(config.staff_roles.iter().filter_map(|name| name.parse().ok()))
    }

    /// Allow-list checks must see the current role and block status.
    #[must_use]
    pub fn requires_live_account(&self) -> bool {
        matches!(self, AccessLevel::AnyOf(_))
    }

    /// Stable label for logs and metrics.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            AccessLevel::Authenticated => "authenticated",
            AccessLevel::Exact(_) => "role_exact",
            AccessLevel::AnyOf(_) => "role_allow_list",
        }
    }

    fn required_roles(&self) -> Vec<Role> {
        match self {
            AccessLevel::Authenticated => Vec::new(),
            AccessLevel::Exact(role) => vec![*role],
            AccessLevel::AnyOf(roles) => roles.clone(),
        }
    }
}

/// Current state of the caller's account, as read from the user store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveAccount {
    pub role: Role,
    pub blocked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    MissingCredential,
    InvalidCredential,
    /// The token's subject does not resolve to an account.
    UnknownSubject,
    AccountBlocked,
    InsufficientRole { actual: Role, required: Vec<Role> },
}

impl DenyReason {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            DenyReason::MissingCredential
            | DenyReason::InvalidCredential
            | DenyReason::UnknownSubject => ErrorKind::Unauthorized,
            DenyReason::AccountBlocked | DenyReason::InsufficientRole { .. } => {
                ErrorKind::Forbidden
            }
        }
    }

    /// Short label for logs and metrics.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            DenyReason::MissingCredential => "missing_credential",
            DenyReason::InvalidCredential => "invalid_credential",
            DenyReason::UnknownSubject => "unknown_subject",
            DenyReason::AccountBlocked => "account_blocked",
            DenyReason::InsufficientRole { .. } => "insufficient_role",
        }
    }
}

impl From<DenyReason> for AppError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            // Missing and invalid credentials share one message so clients
            // cannot tell them apart.
            DenyReason::MissingCredential
            | DenyReason::InvalidCredential
            | DenyReason::UnknownSubject => {
                AppError::unauthorized("Authentication required: missing or invalid token")
            }
            DenyReason::AccountBlocked => AppError::forbidden("Account is blocked"),
            DenyReason::InsufficientRole { required, .. } => {
                AppError::forbidden("Access denied: insufficient role")
                    .with_details(json!({ "required_roles": required }))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Decides whether `role` satisfies `level`. An empty allow-list admits nobody.
#[must_use]
pub fn decide(role: Role, level: &AccessLevel) -> Decision {
    let allowed = match level {
        AccessLevel::Authenticated => true,
        AccessLevel::Exact(required) => role == *required,
        AccessLevel::AnyOf(roles) => roles.contains(&role),
    };

    if allowed {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::InsufficientRole {
            actual: role,
            required: level.required_roles(),
        })
    }
}

/// Resolves the effective role for verified `claims` and applies [`decide`].
///
/// When `live` is present its role and block status win over the token. A
/// level that needs the live account fails closed without one.
pub fn authorize(
    claims: &Claims,
    live: Option<&LiveAccount>,
    level: &AccessLevel,
) -> Result<Role, DenyReason> {
    let role = match live {
        Some(account) if account.blocked => return Err(DenyReason::AccountBlocked),
        Some(account) => account.role,
        None if level.requires_live_account() => return Err(DenyReason::UnknownSubject),
        None => claims.role,
    };

    match decide(role, level) {
        Decision::Allow => Ok(role),
        Decision::Deny(reason) => Err(reason),
    }
}
