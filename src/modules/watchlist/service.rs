use cinetrack_core::{AppError, PaginationMeta, PaginationParams};
use cinetrack_db::WatchlistStore;
use cinetrack_models::{
    CreateWatchlistEntryDto, NewWatchlistEntry, PaginatedWatchlistResponse,
    UpdateWatchlistEntryDto, WatchlistEntry, WatchlistFilterParams,
};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::track_watchlist_operation;

const ENTRY_NOT_FOUND: &str = "Watch-list entry not found";

pub struct WatchlistService;

impl WatchlistService {
    #[instrument(skip(store))]
    pub async fn list(
        store: &dyn WatchlistStore,
        user_id: Uuid,
        filter: WatchlistFilterParams,
        pagination: PaginationParams,
    ) -> Result<PaginatedWatchlistResponse, AppError> {
        let total = store.count_for_user(user_id, filter).await?;
        let data = store
            .list_for_user(user_id, filter, pagination.offset(), pagination.limit())
            .await?;

        Ok(PaginatedWatchlistResponse {
            data,
            meta: PaginationMeta::new(total, &pagination),
        })
    }

    /// Loads an entry owned by `user_id`. Entries of other users look absent.
    pub async fn get_owned(
        store: &dyn WatchlistStore,
        user_id: Uuid,
        entry_id: Uuid,
    ) -> Result<WatchlistEntry, AppError> {
        store
            .get(entry_id)
            .await?
            .filter(|entry| entry.user_id == user_id)
            .ok_or_else(|| AppError::not_found(ENTRY_NOT_FOUND))
    }

    #[instrument(skip(store, dto), fields(media_id = dto.media_id))]
    pub async fn create(
        store: &dyn WatchlistStore,
        user_id: Uuid,
        dto: CreateWatchlistEntryDto,
    ) -> Result<WatchlistEntry, AppError> {
        let entry = store.create(NewWatchlistEntry::from_dto(user_id, dto)).await?;
        track_watchlist_operation("create");
        Ok(entry)
    }

    #[instrument(skip(store, dto))]
    pub async fn update(
        store: &dyn WatchlistStore,
        user_id: Uuid,
        entry_id: Uuid,
        dto: UpdateWatchlistEntryDto,
    ) -> Result<WatchlistEntry, AppError> {
        if dto.is_empty() {
            return Err(AppError::bad_request("No fields to update"));
        }

        Self::get_owned(store, user_id, entry_id).await?;
        let entry = store
            .update(entry_id, &dto)
            .await?
            .ok_or_else(|| AppError::not_found(ENTRY_NOT_FOUND))?;

        track_watchlist_operation("update");
        Ok(entry)
    }

    #[instrument(skip(store))]
    pub async fn delete(
        store: &dyn WatchlistStore,
        user_id: Uuid,
        entry_id: Uuid,
    ) -> Result<(), AppError> {
        Self::get_owned(store, user_id, entry_id).await?;
        if !store.delete(entry_id).await? {
            return Err(AppError::not_found(ENTRY_NOT_FOUND));
        }
        track_watchlist_operation("delete");
        Ok(())
    }
}
