//! Access-token issuance and verification.
//!
//! [`TokenService`] signs HS256 tokens with a secret taken from [`JwtConfig`]
//! at construction time and reads the current time from an injected [`Clock`].
//! Nothing here reads process-wide state, so tests can pin both the secret and
//! the time.
//!
//! Verification never panics and never distinguishes failure causes: a
//! malformed string, a bad signature, a foreign algorithm, an unknown role or
//! an expired timestamp all produce the same [`InvalidToken`] value.
//!
//! # Example
//!
//! ```ignore
//! use cinetrack_auth::{Role, TokenService};
//! use cinetrack_config::JwtConfig;
//!
//! let tokens = TokenService::new(&JwtConfig::from_env());
//! let issued = tokens.issue(user_id, Role::User)?;
//! let claims = tokens.verify(&issued.token)?;
//! assert_eq!(claims, issued.claims);
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use cinetrack_config::JwtConfig;
use cinetrack_config::jwt::sanitize_expiry;
use cinetrack_core::AppError;

use crate::claims::{Claims, Role};

/// Source of the current time.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The single verification failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid or expired token")]
pub struct InvalidToken;

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

#[derive(Clone)]
pub struct TokenService {
    inner: Arc<Inner>,
}

struct Inner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &JwtConfig, clock: Arc<dyn Clock>) -> Self {
        // Expiry is checked against the injected clock, not by the decoder.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            inner: Arc::new(Inner {
                encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
                decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
                validation,
                expiry: Duration::seconds(sanitize_expiry(config.access_token_expiry)),
                clock,
            }),
        }
    }

    /// Token lifetime in seconds.
    #[must_use]
    pub fn expiry_secs(&self) -> i64 {
        self.inner.expiry.num_seconds()
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.inner.clock.now()
    }

    pub fn issue(&self, subject: Uuid, role: Role) -> Result<IssuedToken, AppError> {
        self.issue_at(subject, role, self.now())
    }

    pub fn issue_at(
        &self,
        subject: Uuid,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let claims = Claims {
            sub: subject.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.inner.expiry).timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.inner.encoding_key,
        )
        .map_err(AppError::internal)?;

        Ok(IssuedToken { token, claims })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, InvalidToken> {
        self.verify_at(token, self.now())
    }

    /// Verifies `token` as of `now`. A token is expired once `now >= exp`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, InvalidToken> {
        let claims = decode::<Claims>(token, &self.inner.decoding_key, &self.inner.validation)
            .map(|data| data.claims)
            .map_err(|_| InvalidToken)?;

        if now.timestamp() >= claims.exp {
            return Err(InvalidToken);
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("expiry_secs", &self.expiry_secs())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn fixed_service() -> TokenService {
        TokenService::with_clock(&test_config(), Arc::new(FixedClock(t0())))
    }

    #[test]
    fn test_issue_sets_claims_from_clock() {
        let service = fixed_service();
        let user_id = Uuid::new_v4();
        let issued = service.issue(user_id, Role::Staff).unwrap();

        assert_eq!(issued.claims.sub, user_id.to_string());
        assert_eq!(issued.claims.role, Role::Staff);
        assert_eq!(issued.claims.iat, t0().timestamp());
        assert_eq!(issued.claims.exp, t0().timestamp() + 3600);
    }

    #[test]
    fn test_verify_returns_issued_claims() {
        let service = fixed_service();
        let issued = service.issue(Uuid::new_v4(), Role::Admin).unwrap();
        assert_eq!(service.verify(&issued.token).unwrap(), issued.claims);
    }

    #[test]
    fn test_verify_is_repeatable() {
        let service = fixed_service();
        let issued = service.issue(Uuid::new_v4(), Role::User).unwrap();
        let first = service.verify(&issued.token).unwrap();
        let second = service.verify(&issued.token).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let service = fixed_service();
        let issued = service.issue(Uuid::new_v4(), Role::Admin).unwrap();

        let later = t0() + Duration::hours(2);
        assert_eq!(service.verify_at(&issued.token, later), Err(InvalidToken));
    }

    #[test]
    fn test_expiry_boundary() {
        let service = fixed_service();
        let issued = service.issue(Uuid::new_v4(), Role::User).unwrap();

        let just_before = t0() + Duration::seconds(3599);
        let exactly = t0() + Duration::seconds(3600);
        assert!(service.verify_at(&issued.token, just_before).is_ok());
        assert_eq!(service.verify_at(&issued.token, exactly), Err(InvalidToken));
    }

    #[test]
    fn test_malformed_inputs_are_invalid() {
        let service = fixed_service();
        for token in ["", "invalid-token", "a.b.c", "....", "Bearer abc", "\u{0}\u{1}"] {
            assert_eq!(service.verify(token), Err(InvalidToken), "{token:?}");
        }
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let service = fixed_service();
        let issued = service.issue(Uuid::new_v4(), Role::Admin).unwrap();

        let other = TokenService::with_clock(
            &JwtConfig {
                secret: "different-secret-key-at-least-32-characters".to_string(),
                access_token_expiry: 3600,
            },
            Arc::new(FixedClock(t0())),
        );
        assert_eq!(other.verify(&issued.token), Err(InvalidToken));
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let service = fixed_service();
        let user = service.issue(Uuid::new_v4(), Role::User).unwrap();
        let admin = service.issue(Uuid::new_v4(), Role::Admin).unwrap();

        // Splice the admin payload onto the user signature.
        let user_parts: Vec<&str> = user.token.split('.').collect();
        let admin_parts: Vec<&str> = admin.token.split('.').collect();
        let forged = format!("{}.{}.{}", user_parts[0], admin_parts[1], user_parts[2]);

        assert_eq!(service.verify(&forged), Err(InvalidToken));
    }

    #[test]
    fn test_other_algorithm_is_invalid() {
        let service = fixed_service();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: Role::Admin,
            iat: t0().timestamp(),
            exp: t0().timestamp() + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(test_config().secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(service.verify(&token), Err(InvalidToken));
    }

    #[test]
    fn test_unknown_role_is_invalid() {
        let service = fixed_service();
        let payload = serde_json::json!({
            "sub": Uuid::new_v4().to_string(),
            "role": "ROOT",
            "iat": t0().timestamp(),
            "exp": t0().timestamp() + 3600,
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &payload,
            &EncodingKey::from_secret(test_config().secret.as_bytes()),
        )
        .unwrap();

        assert_eq!(service.verify(&token), Err(InvalidToken));
    }

    #[test]
    fn test_debug_hides_keys() {
        let debug = format!("{:?}", fixed_service());
        assert!(debug.contains("TokenService"));
        assert!(!debug.contains("test-secret"));
    }

    #[test]
    fn test_out_of_range_expiry_uses_default() {
        for expiry in [i64::MAX, 0, -1] {
            let service = TokenService::with_clock(
                &JwtConfig {
                    secret: "test-secret-key-at-least-32-characters-long".to_string(),
                    access_token_expiry: expiry,
                },
                Arc::new(FixedClock(t0())),
            );
            assert_eq!(service.expiry_secs(), 3600);

            let issued = service.issue(Uuid::new_v4(), Role::User).unwrap();
            assert_eq!(issued.claims.exp, t0().timestamp() + 3600);
        }
    }
}
