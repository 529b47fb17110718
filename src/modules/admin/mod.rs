//! Administrator back-office, restricted to role-exact ADMIN.

pub mod controller;
pub mod router;
pub mod service;
