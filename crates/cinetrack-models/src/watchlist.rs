//! Watch-list domain models and DTOs.
//!
//! A watch-list entry tracks one movie or TV show for one user. The pair
//! `(media_type, media_id)` identifies the title in the external catalogue
//! and is unique per user.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use cinetrack_core::PaginationMeta;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WatchStatus {
    #[default]
    PlanToWatch,
    Watching,
    Completed,
    OnHold,
    Dropped,
}

impl WatchStatus {
    pub const ALL: [WatchStatus; 5] = [
        WatchStatus::PlanToWatch,
        WatchStatus::Watching,
        WatchStatus::Completed,
        WatchStatus::OnHold,
        WatchStatus::Dropped,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            WatchStatus::PlanToWatch => "plan_to_watch",
            WatchStatus::Watching => "watching",
            WatchStatus::Completed => "completed",
            WatchStatus::OnHold => "on_hold",
            WatchStatus::Dropped => "dropped",
        }
    }
}

/// A stored column value that does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {field} value: {value}")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
}

impl FromStr for MediaType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(MediaType::Movie),
            "tv" => Ok(MediaType::Tv),
            other => Err(UnknownVariant {
                field: "media_type",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for WatchStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WatchStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                field: "status",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WatchlistEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Identifier of the title in the external catalogue
    pub media_id: i64,
    pub media_type: MediaType,
    pub title: String,
    pub status: WatchStatus,
    /// 1 to 10
    pub rating: Option<i16>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateWatchlistEntryDto {
    #[validate(range(min = 1, message = "media_id must be positive"))]
    pub media_id: i64,
    pub media_type: MediaType,
    #[validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))]
    pub title: String,
    #[serde(default)]
    pub status: WatchStatus,
    #[validate(range(min = 1, max = 10, message = "Rating must be between 1 and 10"))]
    pub rating: Option<i16>,
    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateWatchlistEntryDto {
    #[validate(length(min = 1, max = 300, message = "Title must be 1-300 characters"))]
    pub title: Option<String>,
    pub status: Option<WatchStatus>,
    #[validate(range(min = 1, max = 10, message = "Rating must be between 1 and 10"))]
    pub rating: Option<i16>,
    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

impl UpdateWatchlistEntryDto {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none() && self.rating.is_none() && self.notes.is_none()
    }
}

/// Insert payload for the store.
#[derive(Debug, Clone)]
pub struct NewWatchlistEntry {
    pub user_id: Uuid,
    pub media_id: i64,
    pub media_type: MediaType,
    pub title: String,
    pub status: WatchStatus,
    pub rating: Option<i16>,
    pub notes: Option<String>,
}

impl NewWatchlistEntry {
    #[must_use]
    pub fn from_dto(user_id: Uuid, dto: CreateWatchlistEntryDto) -> Self {
        Self {
            user_id,
            media_id: dto.media_id,
            media_type: dto.media_type,
            title: dto.title.trim().to_string(),
            status: dto.status,
            rating: dto.rating,
            notes: dto.notes,
        }
    }
}

impl WatchlistEntry {
    /// Applies a partial update in place and bumps `updated_at`.
    pub fn apply(&mut self, patch: &UpdateWatchlistEntryDto, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.trim().to_string();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(rating) = patch.rating {
            self.rating = Some(rating);
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct WatchlistFilterParams {
    pub status: Option<WatchStatus>,
    pub media_type: Option<MediaType>,
}

impl WatchlistFilterParams {
    #[must_use]
    pub fn matches(&self, entry: &WatchlistEntry) -> bool {
        self.status.is_none_or(|s| s == entry.status)
            && self.media_type.is_none_or(|m| m == entry.media_type)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedWatchlistResponse {
    pub data: Vec<WatchlistEntry>,
    pub meta: PaginationMeta,
}
