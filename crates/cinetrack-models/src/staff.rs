use serde::Serialize;
use utoipa::ToSchema;

/// Moderation dashboard counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StaffOverview {
    pub total_users: i64,
    pub blocked_users: i64,
    pub admins: i64,
    pub staff: i64,
    pub total_watchlist_entries: i64,
}
