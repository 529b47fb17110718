//! Request authentication and authorization.
//!
//! # Modules
//!
//! - [`auth`]: bearer extraction and the [`AuthUser`](auth::AuthUser) and
//!   [`Caller`](auth::Caller) extractors
//! - [`guard`]: the guard chain and the route middleware built on it
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. A guard middleware (`require_authenticated`, `require_admin`,
//!    `require_staff`) verifies the token and applies the route's access level
//! 3. The resolved [`CallerIdentity`](guard::CallerIdentity) is stored in the
//!    request extensions
//! 4. Handlers read it with the `Caller` extractor
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::Caller;
//!
//! async fn list_entries(Caller(caller): Caller) -> impl IntoResponse {
//!     // caller.user_id, caller.role
//! }
//! ```

pub mod auth;
pub mod guard;
