//! # Cinetrack Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: token signing secret and lifetime
//! - [`cors`]: allowed origins
//! - [`access`]: role allow-list for staff routes
//! - [`server`]: listener address, metrics port, log directory, database URL
//!
//! # Example
//!
//! ```ignore
//! use cinetrack_config::{AccessConfig, CorsConfig, JwtConfig, ServerConfig};
//!
//! dotenvy::dotenv().ok();
//! let jwt_config = JwtConfig::from_env();
//! let access_config = AccessConfig::from_env();
//! ```

pub mod access;
pub mod cors;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use access::AccessConfig;
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
