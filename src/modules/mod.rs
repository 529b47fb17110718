pub mod admin;
pub mod auth;
pub mod staff;
pub mod watchlist;
