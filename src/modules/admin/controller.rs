use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use cinetrack_core::{AppError, ErrorResponse, PaginationParams};
use cinetrack_models::{PaginatedUsersResponse, UpdateRoleDto, User};
use tracing::instrument;

use super::service::AdminService;
use crate::extract::{ApiQuery, IdPath};
use crate::middleware::auth::Caller;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List all accounts
#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated accounts", body = PaginatedUsersResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - ADMIN role required", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> Result<Json<PaginatedUsersResponse>, AppError> {
    let page = AdminService::list_users(state.users.as_ref(), pagination).await?;
    Ok(Json(page))
}

/// Get one account
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    params(("id" = uuid::Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "The account", body = User),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - ADMIN role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> Result<Json<User>, AppError> {
    let user = AdminService::get_user(state.users.as_ref(), id).await?;
    Ok(Json(user))
}

/// Change an account's role
#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}/role",
    params(("id" = uuid::Uuid, Path, description = "User id")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Updated account", body = User),
        (status = 400, description = "Invalid role or self-demotion", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - ADMIN role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, caller), fields(admin_id = %caller.user_id))]
pub async fn update_role(
    State(state): State<AppState>,
    Caller(caller): Caller,
    IdPath(id): IdPath,
    ValidatedJson(dto): ValidatedJson<UpdateRoleDto>,
) -> Result<Json<User>, AppError> {
    let user = AdminService::set_role(state.users.as_ref(), caller.user_id, id, dto.role).await?;
    Ok(Json(user))
}

/// Block an account
#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/block",
    params(("id" = uuid::Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Blocked account", body = User),
        (status = 400, description = "Administrators cannot block themselves", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - ADMIN role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, caller), fields(admin_id = %caller.user_id))]
pub async fn block_user(
    State(state): State<AppState>,
    Caller(caller): Caller,
    IdPath(id): IdPath,
) -> Result<Json<User>, AppError> {
    let user = AdminService::set_blocked(state.users.as_ref(), caller.user_id, id, true).await?;
    Ok(Json(user))
}

/// Unblock an account
#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/unblock",
    params(("id" = uuid::Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Unblocked account", body = User),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - ADMIN role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, caller), fields(admin_id = %caller.user_id))]
pub async fn unblock_user(
    State(state): State<AppState>,
    Caller(caller): Caller,
    IdPath(id): IdPath,
) -> Result<Json<User>, AppError> {
    let user = AdminService::set_blocked(state.users.as_ref(), caller.user_id, id, false).await?;
    Ok(Json(user))
}

/// Delete an account and its watch list
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(("id" = uuid::Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, description = "Administrators cannot delete themselves", body = ErrorResponse),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Forbidden - ADMIN role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
#[instrument(skip(state, caller), fields(admin_id = %caller.user_id))]
pub async fn delete_user(
    State(state): State<AppState>,
    Caller(caller): Caller,
    IdPath(id): IdPath,
) -> Result<StatusCode, AppError> {
    AdminService::delete_user(state.users.as_ref(), caller.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
