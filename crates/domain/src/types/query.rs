//! Read-side filter and pagination shapes for the listing endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// Filter set for the work item listing.
///
/// `work_item_type`, `assigned_to` and `title_contains` are
/// case-insensitive substring matches; the rest are exact.
#[derive(Debug, Clone, Default)]
pub struct WorkItemFilter {
    pub id: Option<i64>,
    pub parent_id: Option<i64>,
    pub work_item_type: Option<String>,
    pub work_item_type_id: Option<String>,
    pub state: Option<String>,
    pub assigned_to_id: Option<String>,
    pub assigned_to: Option<String>,
    pub title_contains: Option<String>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub activated_from: Option<DateTime<Utc>>,
    pub activated_to: Option<DateTime<Utc>>,
    pub closed_from: Option<DateTime<Utc>>,
    pub closed_to: Option<DateTime<Utc>>,
    pub is_closed: Option<bool>,
    pub has_parent: Option<bool>,
}

/// Sort direction for the listing (sorting is by work item ID).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// Limit/offset pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self { limit: DEFAULT_PAGE_LIMIT, offset: 0 }
    }
}

impl Page {
    /// Build a page, clamping the limit into `1..=MAX_PAGE_LIMIT`.
    #[must_use]
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit: limit.clamp(1, MAX_PAGE_LIMIT), offset }
    }
}
