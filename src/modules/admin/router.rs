use axum::{
    Router,
    routing::{get, patch, post},
};

use super::controller::{
    block_user, delete_user, get_user, list_users, unblock_user, update_role,
};
use crate::state::AppState;

pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user).delete(delete_user))
        .route("/users/{id}/role", patch(update_role))
        .route("/users/{id}/block", post(block_user))
        .route("/users/{id}/unblock", post(unblock_user))
}
