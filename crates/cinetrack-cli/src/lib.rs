//! # Cinetrack CLI
//!
//! Account administration that must not depend on an existing admin: the
//! first ADMIN is created here, and roles or blocks can be repaired without
//! going through the HTTP API.
//!
//! ## Usage
//!
//! ```ignore
//! use cinetrack_cli::accounts::create_admin;
//!
//! let admin = create_admin(store.as_ref(), "ops@example.com", "Ops", &password).await?;
//! ```

pub mod accounts;
