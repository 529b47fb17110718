//! PostgreSQL storage backend.
//!
//! Enum columns are stored as TEXT and parsed on the way out, so a row with an
//! unknown value surfaces as [`StoreError::Corrupt`] instead of a panic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cinetrack_auth::Role;
use cinetrack_models::{
    NewUser, NewWatchlistEntry, UpdateWatchlistEntryDto, UserRecord, WatchlistEntry,
    WatchlistFilterParams,
};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{StoreError, classify_write_error};
use crate::store::{DUPLICATE_EMAIL, DUPLICATE_ENTRY, UserStore, WatchlistStore};

const USER_COLUMNS: &str =
    "id, email, display_name, password_hash, role, blocked, created_at, updated_at";

const ENTRY_COLUMNS: &str =
    "id, user_id, media_id, media_type, title, status, rating, notes, created_at, updated_at";

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    display_name: String,
    password_hash: String,
    role: String,
    blocked: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserRecord {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            password_hash: row.password_hash,
            role: row.role.parse()?,
            blocked: row.blocked,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(FromRow)]
struct EntryRow {
    id: Uuid,
    user_id: Uuid,
    media_id: i64,
    media_type: String,
    title: String,
    status: String,
    rating: Option<i16>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EntryRow> for WatchlistEntry {
    type Error = StoreError;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        Ok(WatchlistEntry {
            id: row.id,
            user_id: row.user_id,
            media_id: row.media_id,
            media_type: row.media_type.parse()?,
            title: row.title,
            status: row.status.parse()?,
            rating: row.rating,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn users(rows: Vec<UserRow>) -> Result<Vec<UserRecord>, StoreError> {
    rows.into_iter().map(UserRecord::try_from).collect()
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_user(&self, sql: &str, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        sqlx::query_as::<_, UserRow>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(UserRecord::try_from)
            .transpose()
    }
}

#[async_trait]
impl UserStore for PgStore {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        self.fetch_user(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"), id)
            .await
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .map(UserRecord::try_from)
        .transpose()
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (id, email, display_name, password_hash, role)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, DUPLICATE_EMAIL))?;

        row.try_into()
    }

    #[instrument(skip(self))]
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<UserRecord>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users
             ORDER BY created_at ASC, id ASC
             LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        users(rows)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_blocked(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE blocked")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_by_role(&self, role: Role) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn set_role(&self, id: Uuid, role: Role) -> Result<Option<UserRecord>, StoreError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET role = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await?
        .map(UserRecord::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn set_blocked(
        &self,
        id: Uuid,
        blocked: bool,
    ) -> Result<Option<UserRecord>, StoreError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET blocked = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(blocked)
        .fetch_optional(&self.pool)
        .await?
        .map(UserRecord::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        // watchlist_entries cascade on the foreign key
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl WatchlistStore for PgStore {
    #[instrument(skip(self))]
    async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: WatchlistFilterParams,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<WatchlistEntry>, StoreError> {
        let rows = sqlx::query_as::<_, EntryRow>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM watchlist_entries
             WHERE user_id = $1
               AND ($2::text IS NULL OR status = $2)
               AND ($3::text IS NULL OR media_type = $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        ))
        .bind(user_id)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.media_type.map(|m| m.as_str()))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(WatchlistEntry::try_from).collect()
    }

    async fn count_for_user(
        &self,
        user_id: Uuid,
        filter: WatchlistFilterParams,
    ) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM watchlist_entries
             WHERE user_id = $1
               AND ($2::text IS NULL OR status = $2)
               AND ($3::text IS NULL OR media_type = $3)",
        )
        .bind(user_id)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.media_type.map(|m| m.as_str()))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: Uuid) -> Result<Option<WatchlistEntry>, StoreError> {
        sqlx::query_as::<_, EntryRow>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM watchlist_entries WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(WatchlistEntry::try_from)
        .transpose()
    }

    #[instrument(skip(self, entry), fields(user_id = %entry.user_id, media_id = entry.media_id))]
    async fn create(&self, entry: NewWatchlistEntry) -> Result<WatchlistEntry, StoreError> {
        let row = sqlx::query_as::<_, EntryRow>(&format!(
            "INSERT INTO watchlist_entries
                (id, user_id, media_id, media_type, title, status, rating, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(entry.user_id)
        .bind(entry.media_id)
        .bind(entry.media_type.as_str())
        .bind(&entry.title)
        .bind(entry.status.as_str())
        .bind(entry.rating)
        .bind(&entry.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify_write_error(e, DUPLICATE_ENTRY))?;

        row.try_into()
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        id: Uuid,
        patch: &UpdateWatchlistEntryDto,
    ) -> Result<Option<WatchlistEntry>, StoreError> {
        sqlx::query_as::<_, EntryRow>(&format!(
            "UPDATE watchlist_entries SET
                title = COALESCE($2, title),
                status = COALESCE($3, status),
                rating = COALESCE($4, rating),
                notes = COALESCE($5, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.title.as_deref().map(str::trim))
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.rating)
        .bind(patch.notes.as_deref())
        .fetch_optional(&self.pool)
        .await?
        .map(WatchlistEntry::try_from)
        .transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM watchlist_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM watchlist_entries")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
