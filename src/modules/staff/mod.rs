//! Moderation back-office behind the configurable staff allow-list.

pub mod controller;
pub mod router;
pub mod service;
