//! # Cinetrack Auth
//!
//! Authentication and authorization building blocks for the Cinetrack API.
//!
//! - [`claims`]: [`Role`] and the access-token [`Claims`]
//! - [`jwt`]: [`TokenService`], issuing and verifying HS256 tokens with an
//!   injected secret and clock
//! - [`access`]: the pure authorization decision ([`AccessLevel`], [`decide`],
//!   [`authorize`])
//!
//! # Example
//!
//! ```ignore
//! use cinetrack_auth::{AccessLevel, Role, TokenService, authorize};
//!
//! let issued = tokens.issue(user_id, Role::User)?;
//! let claims = tokens.verify(&issued.token)?;
//! let denied = authorize(&claims, None, &AccessLevel::admin());
//! assert!(denied.is_err());
//! ```

pub mod access;
pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use access::{AccessLevel, Decision, DenyReason, LiveAccount, authorize, decide};
pub use claims::{Claims, Role, UnknownRole};
pub use jwt::{Clock, FixedClock, InvalidToken, IssuedToken, SystemClock, TokenService};
