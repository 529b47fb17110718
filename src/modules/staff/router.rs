use axum::{
    Router,
    routing::{delete, get},
};

use super::controller::{get_overview, get_user_watchlist, list_users, remove_entry};
use crate::state::AppState;

pub fn init_staff_router() -> Router<AppState> {
    Router::new()
        .route("/overview", get(get_overview))
        .route("/users", get(list_users))
        .route("/users/{id}/watchlist", get(get_user_watchlist))
        .route("/watchlist/{id}", delete(remove_entry))
}
