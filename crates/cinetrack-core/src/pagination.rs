//! Pagination utilities for list endpoints.
//!
//! Supports offset-based (`limit` + `offset`) and page-based (`limit` + `page`)
//! pagination. When `page` is provided it takes precedence over `offset`.
//! `limit` is clamped to [1, 100] and defaults to 20.

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// Query strings arrive as text; empty values count as absent.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    pub has_more: bool,
}

impl PaginationMeta {
    #[must_use]
    pub fn new(total: i64, params: &PaginationParams) -> Self {
        let limit = params.limit();
        let offset = params.offset();
        Self {
            total,
            limit,
            offset,
            page: params.page(),
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Maximum number of items to return (1-100, default: 20)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Number of items to skip (ignored if `page` is set)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
    /// Page number, 1-indexed
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl PaginationParams {
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        match self.page {
            Some(page) => (page.max(1) - 1).saturating_mul(self.limit()),
            None => self.offset.unwrap_or(0).max(0),
        }
    }

    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.page(), None);
    }

    #[test]
    fn test_limit_is_clamped() {
        for (input, expected) in [(Some(0), 1), (Some(-5), 1), (Some(150), 100), (Some(35), 35)] {
            let params = PaginationParams {
                limit: input,
                ..Default::default()
            };
            assert_eq!(params.limit(), expected);
        }
    }

    #[test]
    fn test_page_takes_precedence_over_offset() {
        let params = PaginationParams {
            limit: Some(10),
            offset: Some(7),
            page: Some(3),
        };
        assert_eq!(params.offset(), 20);
        assert_eq!(params.page(), Some(3));
    }

    #[test]
    fn test_negative_offset() {
        let params = PaginationParams {
            offset: Some(-1),
            ..Default::default()
        };
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_meta_has_more() {
        let params = PaginationParams {
            limit: Some(10),
            offset: Some(10),
            page: None,
        };
        assert!(PaginationMeta::new(25, &params).has_more);
        assert!(!PaginationMeta::new(20, &params).has_more);
    }

    #[test]
    fn test_huge_page_saturates() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"page":"9223372036854775807"}"#).unwrap();
        assert_eq!(params.offset(), i64::MAX);

        let meta = PaginationMeta::new(3, &params);
        assert_eq!(meta.offset, i64::MAX);
        assert!(!meta.has_more);
    }

    #[test]
    fn test_huge_offset_saturates() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"offset":"9223372036854775807","limit":"50"}"#).unwrap();
        assert_eq!(params.offset(), i64::MAX);

        let meta = PaginationMeta::new(3, &params);
        assert_eq!(meta.limit, 50);
        assert!(!meta.has_more);
    }

    #[test]
    fn test_deserialize_empty_strings() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"limit":"","offset":"5"}"#).unwrap();
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 5);
    }
}
