//! # Cinetrack Core
//!
//! Core types, errors, and utilities for the Cinetrack API.
//!
//! - [`errors`]: the standardized error taxonomy and its JSON envelope
//! - [`pagination`]: pagination parameters and response metadata
//! - [`password`]: bcrypt hashing and the password-strength heuristic
//!
//! # Example
//!
//! ```ignore
//! use cinetrack_core::{AppError, ErrorKind};
//!
//! let err = AppError::not_found("Watch-list entry not found");
//! assert_eq!(err.kind(), ErrorKind::NotFound);
//! assert_eq!(err.status().as_u16(), 404);
//! ```

pub mod errors;
pub mod pagination;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorDetail, ErrorKind, ErrorResponse};
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{
    PasswordStrength, StrengthLevel, evaluate_password, hash_password, verify_password,
};
