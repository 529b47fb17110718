//! In-memory storage backend.
//!
//! Used when no `DATABASE_URL` is configured and by the test suite. Records
//! are kept in insertion order behind a single lock, which gives the same
//! ordering guarantees as the Postgres queries.

use async_trait::async_trait;
use chrono::Utc;
use cinetrack_auth::Role;
use cinetrack_models::{
    NewUser, NewWatchlistEntry, UpdateWatchlistEntryDto, UserRecord, WatchlistEntry,
    WatchlistFilterParams,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::{DUPLICATE_EMAIL, DUPLICATE_ENTRY, UserStore, WatchlistStore};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserRecord>,
    entries: Vec<WatchlistEntry>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page<T: Clone>(items: impl Iterator<Item = T>, offset: i64, limit: i64) -> Vec<T> {
    items
        .skip(usize::try_from(offset).unwrap_or(0))
        .take(usize::try_from(limit).unwrap_or(0))
        .collect()
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(DUPLICATE_EMAIL.to_string()));
        }

        let now = Utc::now();
        let record = UserRecord {
            id: Uuid::new_v4(),
            email: user.email,
            display_name: user.display_name,
            password_hash: user.password_hash,
            role: user.role,
            blocked: false,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(record.clone());
        Ok(record)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<UserRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(page(tables.users.iter().cloned(), offset, limit))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(count(self.tables.read().await.users.len()))
    }

    async fn count_blocked(&self) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        Ok(count(tables.users.iter().filter(|u| u.blocked).count()))
    }

    async fn count_by_role(&self, role: Role) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        Ok(count(tables.users.iter().filter(|u| u.role == role).count()))
    }

    async fn set_role(&self, id: Uuid, role: Role) -> Result<Option<UserRecord>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|user| {
            user.role = role;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn set_blocked(
        &self,
        id: Uuid,
        blocked: bool,
    ) -> Result<Option<UserRecord>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|user| {
            user.blocked = blocked;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Ok(false);
        }
        tables.entries.retain(|e| e.user_id != id);
        Ok(true)
    }
}

#[async_trait]
impl WatchlistStore for MemoryStore {
    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: WatchlistFilterParams,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<WatchlistEntry>, StoreError> {
        let tables = self.tables.read().await;
        let matching = tables
            .entries
            .iter()
            .rev()
            .filter(|e| e.user_id == user_id && filter.matches(e))
            .cloned();
        Ok(page(matching, offset, limit))
    }

    async fn count_for_user(
        &self,
        user_id: Uuid,
        filter: WatchlistFilterParams,
    ) -> Result<i64, StoreError> {
        let tables = self.tables.read().await;
        Ok(count(
            tables
                .entries
                .iter()
                .filter(|e| e.user_id == user_id && filter.matches(e))
                .count(),
        ))
    }

    async fn get(&self, id: Uuid) -> Result<Option<WatchlistEntry>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.entries.iter().find(|e| e.id == id).cloned())
    }

    async fn create(&self, entry: NewWatchlistEntry) -> Result<WatchlistEntry, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == entry.user_id) {
            return Err(StoreError::MissingOwner);
        }
        let duplicate = tables.entries.iter().any(|e| {
            e.user_id == entry.user_id
                && e.media_type == entry.media_type
                && e.media_id == entry.media_id
        });
        if duplicate {
            return Err(StoreError::Conflict(DUPLICATE_ENTRY.to_string()));
        }

        let now = Utc::now();
        let created = WatchlistEntry {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            media_id: entry.media_id,
            media_type: entry.media_type,
            title: entry.title,
            status: entry.status,
            rating: entry.rating,
            notes: entry.notes,
            created_at: now,
            updated_at: now,
        };
        tables.entries.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: &UpdateWatchlistEntryDto,
    ) -> Result<Option<WatchlistEntry>, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.entries.iter_mut().find(|e| e.id == id).map(|entry| {
            entry.apply(patch, Utc::now());
            entry.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.entries.len();
        tables.entries.retain(|e| e.id != id);
        Ok(tables.entries.len() != before)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(count(self.tables.read().await.entries.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinetrack_models::{MediaType, WatchStatus};

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            display_name: "Viewer".to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
        }
    }

    fn new_entry(user_id: Uuid, media_id: i64) -> NewWatchlistEntry {
        NewWatchlistEntry {
            user_id,
            media_id,
            media_type: MediaType::Movie,
            title: format!("Movie {media_id}"),
            status: WatchStatus::PlanToWatch,
            rating: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        UserStore::create(&store, new_user("a@example.com")).await.unwrap();
        let err = UserStore::create(&store, new_user("a@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_set_role_and_block() {
        let store = MemoryStore::new();
        let user = UserStore::create(&store, new_user("b@example.com")).await.unwrap();

        let promoted = store.set_role(user.id, Role::Staff).await.unwrap().unwrap();
        assert_eq!(promoted.role, Role::Staff);
        let blocked = store.set_blocked(user.id, true).await.unwrap().unwrap();
        assert!(blocked.blocked);
        assert_eq!(store.count_blocked().await.unwrap(), 1);
        assert_eq!(store.count_by_role(Role::Staff).await.unwrap(), 1);

        assert!(store.set_role(Uuid::new_v4(), Role::Admin).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_pages_in_creation_order() {
        let store = MemoryStore::new();
        for i in 0..5 {
            UserStore::create(&store, new_user(&format!("u{i}@example.com")))
                .await
                .unwrap();
        }
        let page = store.list(1, 2).await.unwrap();
        let emails: Vec<_> = page.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, ["u1@example.com", "u2@example.com"]);
        assert_eq!(UserStore::count(&store).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_duplicate_entry_conflicts_per_user() {
        let store = MemoryStore::new();
        let alice = UserStore::create(&store, new_user("alice@example.com")).await.unwrap();
        let bob = UserStore::create(&store, new_user("bob@example.com")).await.unwrap();

        WatchlistStore::create(&store, new_entry(alice.id, 603)).await.unwrap();
        let err = WatchlistStore::create(&store, new_entry(alice.id, 603))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        // Same title for another user is fine.
        WatchlistStore::create(&store, new_entry(bob.id, 603)).await.unwrap();
        assert_eq!(WatchlistStore::count(&store).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_list_for_user_filters_and_orders() {
        let store = MemoryStore::new();
        let alice = UserStore::create(&store, new_user("alice@example.com")).await.unwrap();
        for id in 1..=3 {
            WatchlistStore::create(&store, new_entry(alice.id, id)).await.unwrap();
        }
        let first = store
            .list_for_user(alice.id, WatchlistFilterParams::default(), 0, 10)
            .await
            .unwrap();
        assert_eq!(first.iter().map(|e| e.media_id).collect::<Vec<_>>(), [3, 2, 1]);

        let patch = UpdateWatchlistEntryDto {
            status: Some(WatchStatus::Completed),
            ..Default::default()
        };
        store.update(first[0].id, &patch).await.unwrap().unwrap();

        let completed = WatchlistFilterParams {
            status: Some(WatchStatus::Completed),
            media_type: None,
        };
        assert_eq!(store.count_for_user(alice.id, completed).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_entry_for_unknown_user_is_rejected() {
        let store = MemoryStore::new();
        let err = WatchlistStore::create(&store, new_entry(Uuid::new_v4(), 603))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingOwner));
        assert_eq!(WatchlistStore::count(&store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_user_removes_entries() {
        let store = MemoryStore::new();
        let alice = UserStore::create(&store, new_user("alice@example.com")).await.unwrap();
        WatchlistStore::create(&store, new_entry(alice.id, 1)).await.unwrap();

        assert!(UserStore::delete(&store, alice.id).await.unwrap());
        assert!(!UserStore::delete(&store, alice.id).await.unwrap());
        assert_eq!(WatchlistStore::count(&store).await.unwrap(), 0);
    }
}
