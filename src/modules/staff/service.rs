use cinetrack_auth::Role;
use cinetrack_core::{AppError, PaginationMeta, PaginationParams};
use cinetrack_db::{UserStore, WatchlistStore};
use cinetrack_models::{PaginatedWatchlistResponse, StaffOverview, WatchlistFilterParams};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::metrics::track_moderation_action;

pub struct StaffService;

impl StaffService {
    #[instrument(skip(users, watchlist))]
    pub async fn overview(
        users: &dyn UserStore,
        watchlist: &dyn WatchlistStore,
    ) -> Result<StaffOverview, AppError> {
        Ok(StaffOverview {
            total_users: users.count().await?,
            blocked_users: users.count_blocked().await?,
            admins: users.count_by_role(Role::Admin).await?,
            staff: users.count_by_role(Role::Staff).await?,
            total_watchlist_entries: watchlist.count().await?,
        })
    }

    /// Any user's watch list, for moderation.
    #[instrument(skip(users, watchlist))]
    pub async fn user_watchlist(
        users: &dyn UserStore,
        watchlist: &dyn WatchlistStore,
        user_id: Uuid,
        filter: WatchlistFilterParams,
        pagination: PaginationParams,
    ) -> Result<PaginatedWatchlistResponse, AppError> {
        if users.find_by_id(user_id).await?.is_none() {
            return Err(AppError::not_found("User not found"));
        }

        let total = watchlist.count_for_user(user_id, filter).await?;
        let data = watchlist
            .list_for_user(user_id, filter, pagination.offset(), pagination.limit())
            .await?;

        Ok(PaginatedWatchlistResponse {
            data,
            meta: PaginationMeta::new(total, &pagination),
        })
    }

    #[instrument(skip(watchlist))]
    pub async fn remove_entry(
        watchlist: &dyn WatchlistStore,
        moderator: Uuid,
        entry_id: Uuid,
    ) -> Result<(), AppError> {
        if !watchlist.delete(entry_id).await? {
            return Err(AppError::not_found("Watch-list entry not found"));
        }

        track_moderation_action("remove_entry");
        info!(%moderator, %entry_id, "Watch-list entry removed by staff");
        Ok(())
    }
}
