use std::env;

/// Token lifetime used when `JWT_ACCESS_EXPIRY` is unset or out of range.
pub const DEFAULT_ACCESS_EXPIRY: i64 = 3600; // 1 hour
/// Longest accepted token lifetime, one year.
pub const MAX_ACCESS_EXPIRY: i64 = 365 * 24 * 3600;

/// Signing configuration for access tokens.
///
/// # Environment Variables
///
/// - `JWT_SECRET`: HMAC secret (default is for development only)
/// - `JWT_ACCESS_EXPIRY`: token lifetime in seconds, 1 to [`MAX_ACCESS_EXPIRY`]
///   (default: 3600)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string()),
            access_token_expiry: parse_expiry(env::var("JWT_ACCESS_EXPIRY").ok().as_deref()),
        }
    }
}

/// Returns `secs` when it is a usable lifetime, else the default.
#[must_use]
pub fn sanitize_expiry(secs: i64) -> i64 {
    if (1..=MAX_ACCESS_EXPIRY).contains(&secs) {
        secs
    } else {
        DEFAULT_ACCESS_EXPIRY
    }
}

fn parse_expiry(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse().ok())
        .map_or(DEFAULT_ACCESS_EXPIRY, sanitize_expiry)
}
