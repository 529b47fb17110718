use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use cinetrack_auth::{AccessLevel, Claims, DenyReason};
use cinetrack_core::AppError;
use uuid::Uuid;

use crate::metrics::track_jwt_validation;
use crate::middleware::guard::{CallerIdentity, authorize};
use crate::state::AppState;

/// Reads the bearer token from the `Authorization` header.
///
/// A missing header, another scheme, a value that is not visible ASCII or an
/// empty token all yield `None`.
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let Authorization(bearer) = headers.typed_get::<Authorization<Bearer>>()?;
    let token = bearer.token().trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Extractor for the verified token claims. Checks the signature and expiry
/// only; no store access.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub).map_err(|_| DenyReason::InvalidCredential.into())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer(&parts.headers).ok_or(DenyReason::MissingCredential)?;

        let claims = state.tokens.verify(&token).map_err(|_| {
            track_jwt_validation(false);
            DenyReason::InvalidCredential
        })?;
        track_jwt_validation(true);

        Ok(AuthUser(claims))
    }
}

/// Extractor for the resolved caller.
///
/// Reuses the identity a guard middleware stored on the request; on an
/// unguarded route it runs the authenticated-only chain itself.
#[derive(Debug, Clone)]
pub struct Caller(pub CallerIdentity);

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<CallerIdentity>() {
            return Ok(Caller(identity.clone()));
        }

        authorize(state, &parts.headers, &AccessLevel::Authenticated)
            .await
            .map(Caller)
    }
}
