use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use cinetrack_core::{AppError, ErrorResponse, PaginationParams};
use cinetrack_models::{
    CreateWatchlistEntryDto, PaginatedWatchlistResponse, UpdateWatchlistEntryDto, WatchlistEntry,
    WatchlistFilterParams,
};
use tracing::instrument;

use super::service::WatchlistService;
use crate::extract::{ApiQuery, IdPath};
use crate::middleware::auth::Caller;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List the caller's watch list
#[utoipa::path(
    get,
    path = "/api/watchlist",
    params(WatchlistFilterParams, PaginationParams),
    responses(
        (status = 200, description = "Paginated entries, newest first", body = PaginatedWatchlistResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Watch list"
)]
#[instrument(skip(state, caller), fields(user_id = %caller.user_id))]
pub async fn list_entries(
    State(state): State<AppState>,
    Caller(caller): Caller,
    ApiQuery(filter): ApiQuery<WatchlistFilterParams>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> Result<Json<PaginatedWatchlistResponse>, AppError> {
    let page =
        WatchlistService::list(state.watchlist.as_ref(), caller.user_id, filter, pagination)
            .await?;
    Ok(Json(page))
}

/// Add a title to the caller's watch list
#[utoipa::path(
    post,
    path = "/api/watchlist",
    request_body = CreateWatchlistEntryDto,
    responses(
        (status = 201, description = "Entry created", body = WatchlistEntry),
        (status = 400, description = "Invalid body or title already tracked", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Watch list"
)]
#[instrument(skip(state, caller, dto), fields(user_id = %caller.user_id))]
pub async fn create_entry(
    State(state): State<AppState>,
    Caller(caller): Caller,
    ValidatedJson(dto): ValidatedJson<CreateWatchlistEntryDto>,
) -> Result<(StatusCode, Json<WatchlistEntry>), AppError> {
    let entry = WatchlistService::create(state.watchlist.as_ref(), caller.user_id, dto).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Get one of the caller's entries
#[utoipa::path(
    get,
    path = "/api/watchlist/{id}",
    params(("id" = uuid::Uuid, Path, description = "Entry id")),
    responses(
        (status = 200, description = "The entry", body = WatchlistEntry),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No such entry for this user", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Watch list"
)]
#[instrument(skip(state, caller), fields(user_id = %caller.user_id))]
pub async fn get_entry(
    State(state): State<AppState>,
    Caller(caller): Caller,
    IdPath(id): IdPath,
) -> Result<Json<WatchlistEntry>, AppError> {
    let entry = WatchlistService::get_owned(state.watchlist.as_ref(), caller.user_id, id).await?;
    Ok(Json(entry))
}

/// Update status, rating, notes or title
#[utoipa::path(
    patch,
    path = "/api/watchlist/{id}",
    params(("id" = uuid::Uuid, Path, description = "Entry id")),
    request_body = UpdateWatchlistEntryDto,
    responses(
        (status = 200, description = "Updated entry", body = WatchlistEntry),
        (status = 400, description = "Invalid or empty update", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No such entry for this user", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Watch list"
)]
#[instrument(skip(state, caller, dto), fields(user_id = %caller.user_id))]
pub async fn update_entry(
    State(state): State<AppState>,
    Caller(caller): Caller,
    IdPath(id): IdPath,
    ValidatedJson(dto): ValidatedJson<UpdateWatchlistEntryDto>,
) -> Result<Json<WatchlistEntry>, AppError> {
    let entry =
        WatchlistService::update(state.watchlist.as_ref(), caller.user_id, id, dto).await?;
    Ok(Json(entry))
}

/// Remove an entry
#[utoipa::path(
    delete,
    path = "/api/watchlist/{id}",
    params(("id" = uuid::Uuid, Path, description = "Entry id")),
    responses(
        (status = 204, description = "Entry removed"),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 404, description = "No such entry for this user", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Watch list"
)]
#[instrument(skip(state, caller), fields(user_id = %caller.user_id))]
pub async fn delete_entry(
    State(state): State<AppState>,
    Caller(caller): Caller,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    WatchlistService::delete(state.watchlist.as_ref(), caller.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
