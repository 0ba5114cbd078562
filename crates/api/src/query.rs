//! Shared query parameter types for API handlers.

use serde::Deserialize;
use thesis_core::search::{clamp_limit, clamp_offset, like_pattern, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use thesis_core::types::DbId;
use thesis_db::models::filter::ListFilter;

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamped `(limit, offset)`.
    pub fn resolve(&self) -> (i64, i64) {
        (
            clamp_limit(self.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
            clamp_offset(self.offset),
        )
    }
}

/// Catalog list parameters (`?q=&code=&limit=&offset=`).
///
/// `q` is a case-insensitive substring match on the name (or title), `code`
/// an exact match.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub q: Option<String>,
    pub code: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListParams {
    pub fn to_filter(&self) -> ListFilter {
        ListFilter {
            pattern: like_pattern(self.q.as_deref()),
            code: self
                .code
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            limit: clamp_limit(self.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
            offset: clamp_offset(self.offset),
        }
    }
}

/// `?year=` filter for the statistics endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct YearParams {
    pub year: Option<i32>,
}

/// `?council_id=&limit=&offset=`, for council-scoped listings.
#[derive(Debug, Default, Deserialize)]
pub struct CouncilScopedParams {
    pub council_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl CouncilScopedParams {
    pub fn page(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Thesis list parameters (`?q=&council_id=&limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct ThesisListParams {
    pub q: Option<String>,
    pub council_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ThesisListParams {
    pub fn to_filter(&self) -> ListFilter {
        ListParams {
            q: self.q.clone(),
            code: None,
            limit: self.limit,
            offset: self.offset,
        }
        .to_filter()
    }
}

/// Score list parameters (`?thesis_id=&criteria_id=&limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct ScoreListParams {
    pub thesis_id: Option<DbId>,
    pub criteria_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
