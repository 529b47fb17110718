//! # Cinetrack Models
//!
//! Domain models and DTOs for the Cinetrack API.
//!
//! # Modules
//!
//! - [`auth`]: registration, login and password-strength payloads
//! - [`users`]: accounts and admin DTOs
//! - [`watchlist`]: watch-list entries, statuses and filters
//! - [`staff`]: moderation overview payloads

pub mod auth;
pub mod staff;
pub mod users;
pub mod watchlist;

// Re-export commonly used types at crate root for convenience
pub use auth::{
    LoginRequest, LoginResponse, MessageResponse, PasswordStrengthRequest, RegisterRequest,
};
pub use staff::StaffOverview;
pub use users::{
    NewUser, PaginatedUsersResponse, UpdateRoleDto, User, UserRecord, normalize_email,
};
pub use watchlist::{
    CreateWatchlistEntryDto, MediaType, NewWatchlistEntry, PaginatedWatchlistResponse,
    UnknownVariant, UpdateWatchlistEntryDto, WatchStatus, WatchlistEntry, WatchlistFilterParams,
};
