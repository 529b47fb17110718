use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{check_password_strength, get_me, login_user, register_user};
use crate::state::AppState;

/// `/me` is gated by its `AuthUser` extractor; the rest are public.
pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/password-strength", post(check_password_strength))
        .route("/me", get(get_me))
}
