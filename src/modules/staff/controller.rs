use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use cinetrack_core::{AppError, ErrorResponse, PaginationParams};
use cinetrack_models::{
    PaginatedUsersResponse, PaginatedWatchlistResponse, StaffOverview, WatchlistFilterParams,
};
use tracing::instrument;

use super::service::StaffService;
use crate::extract::{ApiQuery, IdPath};
use crate::middleware::auth::Caller;
use crate::modules::admin::service::AdminService;
use crate::state::AppState;

/// Moderation counters
#[utoipa::path(
    get,
    path = "/api/staff/overview",
    responses(
        (status = 200, description = "Counters", body = StaffOverview),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - role not in the staff allow-list, or account blocked", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
#[instrument(skip(state))]
pub async fn get_overview(State(state): State<AppState>) -> Result<Json<StaffOverview>, AppError> {
    let overview = StaffService::overview(state.users.as_ref(), state.watchlist.as_ref()).await?;
    Ok(Json(overview))
}

/// User directory
#[utoipa::path(
    get,
    path = "/api/staff/users",
    operation_id = "staff_list_users",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated accounts", body = PaginatedUsersResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - role not in the staff allow-list, or account blocked", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> Result<Json<PaginatedUsersResponse>, AppError> {
    let page = AdminService::list_users(state.users.as_ref(), pagination).await?;
    Ok(Json(page))
}

/// Another user's watch list
#[utoipa::path(
    get,
    path = "/api/staff/users/{id}/watchlist",
    params(
        ("id" = uuid::Uuid, Path, description = "User id"),
        WatchlistFilterParams,
        PaginationParams
    ),
    responses(
        (status = 200, description = "Paginated entries", body = PaginatedWatchlistResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - role not in the staff allow-list, or account blocked", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
#[instrument(skip(state))]
pub async fn get_user_watchlist(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiQuery(filter): ApiQuery<WatchlistFilterParams>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> Result<Json<PaginatedWatchlistResponse>, AppError> {
    let page = StaffService::user_watchlist(
        state.users.as_ref(),
        state.watchlist.as_ref(),
        id,
        filter,
        pagination,
    )
    .await?;
    Ok(Json(page))
}

/// Remove any user's watch-list entry
#[utoipa::path(
    delete,
    path = "/api/staff/watchlist/{id}",
    params(("id" = uuid::Uuid, Path, description = "Entry id")),
    responses(
        (status = 204, description = "Entry removed"),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - role not in the staff allow-list, or account blocked", body = ErrorResponse),
        (status = 404, description = "Entry not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Staff"
)]
#[instrument(skip(state, caller), fields(moderator = %caller.user_id))]
pub async fn remove_entry(
    State(state): State<AppState>,
    Caller(caller): Caller,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    StaffService::remove_entry(state.watchlist.as_ref(), caller.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
