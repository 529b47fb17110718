//! Storage seams used by the HTTP layer.
//!
//! Both traits are object safe so the application state can hold
//! `Arc<dyn UserStore>` and swap Postgres for the in-memory backend in tests.

use std::fmt::Debug;

use async_trait::async_trait;
use cinetrack_auth::Role;
use cinetrack_models::{
    NewUser, NewWatchlistEntry, UpdateWatchlistEntryDto, UserRecord, WatchlistEntry,
    WatchlistFilterParams,
};
use uuid::Uuid;

use crate::error::StoreError;

pub const DUPLICATE_EMAIL: &str = "Email already exists";
pub const DUPLICATE_ENTRY: &str = "Title is already on the watch list";

#[async_trait]
pub trait UserStore: Send + Sync + Debug {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// `email` is expected in normalized form.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Fails with [`StoreError::Conflict`] when the email is taken.
    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Accounts ordered by creation time.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<UserRecord>, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;

    async fn count_blocked(&self) -> Result<i64, StoreError>;

    async fn count_by_role(&self, role: Role) -> Result<i64, StoreError>;

    async fn set_role(&self, id: Uuid, role: Role) -> Result<Option<UserRecord>, StoreError>;

    async fn set_blocked(&self, id: Uuid, blocked: bool)
    -> Result<Option<UserRecord>, StoreError>;

    /// Deletes the account and its watch list. Returns `false` if absent.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait WatchlistStore: Send + Sync + Debug {
    /// Entries for one user, newest first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: WatchlistFilterParams,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<WatchlistEntry>, StoreError>;

    async fn count_for_user(
        &self,
        user_id: Uuid,
        filter: WatchlistFilterParams,
    ) -> Result<i64, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<WatchlistEntry>, StoreError>;

    /// Fails with [`StoreError::Conflict`] when the user already tracks the title
    /// and with [`StoreError::MissingOwner`] when the user does not exist.
    async fn create(&self, entry: NewWatchlistEntry) -> Result<WatchlistEntry, StoreError>;

    async fn update(
        &self,
        id: Uuid,
        patch: &UpdateWatchlistEntryDto,
    ) -> Result<Option<WatchlistEntry>, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}
