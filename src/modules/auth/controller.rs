use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use cinetrack_core::{AppError, ErrorResponse, PasswordStrength};
use cinetrack_models::{LoginRequest, LoginResponse, PasswordStrengthRequest, RegisterRequest, User};
use tracing::instrument;

use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = User),
        (status = 400, description = "Email already exists, malformed body or failed validation (including weak passwords)", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = AuthService::register(state.users.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Account is blocked", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(state.users.as_ref(), &state.tokens, dto).await?;
    Ok(Json(response))
}

/// Score a candidate password
#[utoipa::path(
    post,
    path = "/api/auth/password-strength",
    request_body = PasswordStrengthRequest,
    responses(
        (status = 200, description = "Strength report", body = PasswordStrength),
        (status = 400, description = "Bad request", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(dto))]
pub async fn check_password_strength(
    ValidatedJson(dto): ValidatedJson<PasswordStrengthRequest>,
) -> Json<PasswordStrength> {
    Json(cinetrack_core::evaluate_password(
        &dto.password,
        &dto.user_inputs(),
    ))
}

/// Current account
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "The authenticated account", body = User),
        (status = 401, description = "Unauthorized - missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, auth), fields(user_id = %auth.0.sub))]
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<User>, AppError> {
    let user = AuthService::profile(state.users.as_ref(), auth.user_id()?).await?;
    Ok(Json(user))
}
