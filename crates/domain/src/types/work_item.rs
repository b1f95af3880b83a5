//! Work item row and read-side shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted work item, keyed by its externally-supplied integer ID.
///
/// `created_date` / `activated_date` / `closed_date` are the lifecycle
/// instants coming from the external tracker; downstream calculations
/// assume `closed_date >= activated_date >= created_date` where present,
/// but the store does not enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItemRow {
    pub id: i64,
    pub work_item_type_id: String,
    pub state: String,
    pub created_date: DateTime<Utc>,
    pub activated_date: Option<DateTime<Utc>>,
    pub closed_date: Option<DateTime<Utc>>,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to_id: Option<String>,
    pub parent_id: Option<i64>,
}

impl WorkItemRow {
    /// Field-by-field comparison over every tracked field.
    ///
    /// Dates compare by instant equality; the bookkeeping columns
    /// (`created_at` / `updated_at`) are not tracked and live only in
    /// storage.
    #[must_use]
    pub fn differs_from(&self, other: &Self) -> bool {
        self.work_item_type_id != other.work_item_type_id
            || self.state != other.state
            || self.created_date != other.created_date
            || self.activated_date != other.activated_date
            || self.closed_date != other.closed_date
            || self.title != other.title
            || self.description != other.description
            || self.assigned_to_id != other.assigned_to_id
            || self.parent_id != other.parent_id
    }
}

/// A work item as returned by the listing read: the row joined with its
/// type and assignee display names, plus the derived business-day count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemView {
    pub id: i64,
    pub work_item_type_id: String,
    pub work_item_type: String,
    pub state: String,
    pub created_date: DateTime<Utc>,
    pub activated_date: Option<DateTime<Utc>>,
    pub closed_date: Option<DateTime<Utc>>,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to_id: Option<String>,
    pub assigned_to: Option<String>,
    pub parent_id: Option<i64>,
    /// Inclusive business days from activation (or creation) to close;
    /// `None` while the item is still open, never 0 for an open item.
    pub development_business_days: Option<u32>,
}

/// Date projection used for the listing summary average.
#[derive(Debug, Clone)]
pub struct WorkItemDates {
    pub state: String,
    pub created_date: DateTime<Utc>,
    pub activated_date: Option<DateTime<Utc>>,
    pub closed_date: Option<DateTime<Utc>>,
}
