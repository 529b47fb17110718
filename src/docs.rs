use cinetrack_auth::Role;
use cinetrack_core::{ErrorDetail, ErrorKind, ErrorResponse, PaginationMeta, PasswordStrength, StrengthLevel};
use cinetrack_models::{
    CreateWatchlistEntryDto, LoginRequest, LoginResponse, MediaType, PaginatedUsersResponse,
    PaginatedWatchlistResponse, PasswordStrengthRequest, RegisterRequest, StaffOverview,
    UpdateRoleDto, UpdateWatchlistEntryDto, User, WatchStatus, WatchlistEntry,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::check_password_strength,
        crate::modules::auth::controller::get_me,
        crate::modules::watchlist::controller::list_entries,
        crate::modules::watchlist::controller::create_entry,
        crate::modules::watchlist::controller::get_entry,
        crate::modules::watchlist::controller::update_entry,
        crate::modules::watchlist::controller::delete_entry,
        crate::modules::admin::controller::list_users,
        crate::modules::admin::controller::get_user,
        crate::modules::admin::controller::update_role,
        crate::modules::admin::controller::block_user,
        crate::modules::admin::controller::unblock_user,
        crate::modules::admin::controller::delete_user,
        crate::modules::staff::controller::get_overview,
        crate::modules::staff::controller::list_users,
        crate::modules::staff::controller::get_user_watchlist,
        crate::modules::staff::controller::remove_entry,
    ),
    components(
        schemas(
            Role,
            User,
            UpdateRoleDto,
            PaginatedUsersResponse,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            PasswordStrengthRequest,
            PasswordStrength,
            StrengthLevel,
            WatchlistEntry,
            MediaType,
            WatchStatus,
            CreateWatchlistEntryDto,
            UpdateWatchlistEntryDto,
            PaginatedWatchlistResponse,
            StaffOverview,
            PaginationMeta,
            ErrorResponse,
            ErrorDetail,
            ErrorKind,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and the current account"),
        (name = "Watch list", description = "The caller's own watch list"),
        (name = "Admin", description = "Account administration (ADMIN only)"),
        (name = "Staff", description = "Moderation (configurable staff roles)")
    ),
    info(
        title = "Cinetrack API",
        version = "0.1.0",
        description = "Track the movies and TV series you plan to watch, are watching and have finished.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
