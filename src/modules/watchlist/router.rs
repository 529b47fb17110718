use axum::{Router, routing::get};

use super::controller::{create_entry, delete_entry, get_entry, list_entries, update_entry};
use crate::state::AppState;

pub fn init_watchlist_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route("/{id}", get(get_entry).patch(update_entry).delete(delete_entry))
}
