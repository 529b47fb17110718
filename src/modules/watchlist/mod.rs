//! The caller's own watch list. Entries of other users are invisible.

pub mod controller;
pub mod router;
pub mod service;
