//! Access policy configuration.
//!
//! Staff back-office routes accept any role listed in `STAFF_ROLES`
//! (comma-separated, default `ADMIN,STAFF`). Administrator routes always require
//! the exact `ADMIN` role and are not configurable here.

use std::env;

const DEFAULT_STAFF_ROLES: &str = "ADMIN,STAFF";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessConfig {
    /// Role names accepted by staff routes, upper-cased.
    pub staff_roles: Vec<String>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            staff_roles: parse_role_list(DEFAULT_STAFF_ROLES),
        }
    }
}

impl AccessConfig {
    pub fn from_env() -> Self {
        let raw = env::var("STAFF_ROLES").unwrap_or_else(|_| DEFAULT_STAFF_ROLES.to_string());
        Self {
            staff_roles: parse_role_list(&raw),
        }
    }
}

/// Upper-cased, blank entries dropped, first occurrence order kept.
fn parse_role_list(raw: &str) -> Vec<String> {
    let mut roles: Vec<String> = Vec::new();
    for role in raw.split(',').map(|s| s.trim().to_ascii_uppercase()) {
        if !role.is_empty() && !roles.contains(&role) {
            roles.push(role);
        }
    }
    roles
}
