//! The guard chain shared by every protected route.
//!
//! `extract -> verify -> (live account read) -> decide`, each step able to
//! short-circuit. Every failure resolves to a deny; nothing falls through to
//! the handler.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use cinetrack_auth::{AccessLevel, Claims, DenyReason, Role, access};
use cinetrack_core::AppError;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::metrics::{track_authorization_check, track_jwt_validation};
use crate::middleware::auth::extract_bearer;
use crate::state::AppState;

/// Who is calling, as resolved by the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: Uuid,
    /// Effective role: the live role when the store was read, else the token role.
    pub role: Role,
    pub claims: Claims,
    /// `Some` only when the live account was read.
    pub blocked: Option<bool>,
}

fn deny(level: &AccessLevel, reason: DenyReason) -> AppError {
    warn!(
        level = level.label(),
        reason = reason.label(),
        "Request denied by guard"
    );
    track_authorization_check(level.label(), false);
    reason.into()
}

/// Runs the guard chain for `level` against the request headers.
pub async fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    level: &AccessLevel,
) -> Result<CallerIdentity, AppError> {
    let Some(token) = extract_bearer(headers) else {
        return Err(deny(level, DenyReason::MissingCredential));
    };

    let claims = match state.tokens.verify(&token) {
        Ok(claims) => {
            track_jwt_validation(true);
            claims
        }
        Err(_) => {
            track_jwt_validation(false);
            return Err(deny(level, DenyReason::InvalidCredential));
        }
    };

    let Ok(user_id) = Uuid::parse_str(&claims.sub) else {
        return Err(deny(level, DenyReason::InvalidCredential));
    };

    let live = if level.requires_live_account() {
        match state.users.find_by_id(user_id).await {
            Ok(record) => record.map(|user| user.live_account()),
            Err(err) => {
                track_authorization_check(level.label(), false);
                return Err(err.into());
            }
        }
    } else {
        None
    };

    let role = access::authorize(&claims, live.as_ref(), level).map_err(|r| deny(level, r))?;

    track_authorization_check(level.label(), true);
    debug!(%user_id, %role, level = level.label(), "Request authorized");

    Ok(CallerIdentity {
        user_id,
        role,
        claims,
        blocked: live.map(|account| account.blocked),
    })
}

async fn guard(state: AppState, level: &AccessLevel, mut req: Request, next: Next) -> Response {
    let outcome = authorize(&state, req.headers(), level).await;
    match outcome {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

/// Any valid, unexpired token.
///
/// ```rust,ignore
/// Router::new()
///     .route("/", get(list_entries))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_authenticated));
/// ```
pub async fn require_authenticated(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    guard(state, &AccessLevel::Authenticated, req, next).await
}

/// Role-exact ADMIN, judged from the token.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    guard(state, &AccessLevel::admin(), req, next).await
}

/// The configured staff allow-list, judged from the live account.
pub async fn require_staff(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let level = state.staff_access.clone();
    guard(state, &level, req, next).await
}
