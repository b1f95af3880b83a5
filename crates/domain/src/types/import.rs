//! Import batch shapes: raw external records and reconciliation output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw work item record as submitted to the import endpoint.
///
/// Two equivalent key-naming conventions are accepted for the same
/// payload: space-separated keys (`"work item type"`, the external
/// tracker's export shape) and camelCase (`workItemType`). Serde aliases
/// normalize both to this one internal shape. Every field is optional at
/// this stage; required-field and format checking happens in the
/// reconciliation engine so that the caller gets a complete per-field
/// issue list instead of a bare deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWorkItem {
    pub id: Option<String>,
    #[serde(rename = "work item type", alias = "workItemType")]
    pub work_item_type: Option<String>,
    #[serde(rename = "assigned to", alias = "assignedTo")]
    pub assigned_to: Option<String>,
    pub state: Option<String>,
    #[serde(rename = "created date", alias = "createdDate")]
    pub created_date: Option<String>,
    #[serde(rename = "activated date", alias = "activatedDate")]
    pub activated_date: Option<String>,
    #[serde(rename = "closed date", alias = "closedDate")]
    pub closed_date: Option<String>,
    pub description: Option<String>,
    pub title: Option<String>,
    pub parent: Option<String>,
}

/// A raw record after parsing and canonicalization, before reference
/// resolution against the dimension maps and the batch's own titles.
#[derive(Debug, Clone)]
pub struct ParsedWorkItem {
    pub id: i64,
    pub work_item_type: String,
    pub state: String,
    pub created_date: DateTime<Utc>,
    pub activated_date: Option<DateTime<Utc>>,
    pub closed_date: Option<DateTime<Utc>>,
    pub title: String,
    pub title_normalized: String,
    pub description: Option<String>,
    pub assigned_to_name: Option<String>,
    pub parent_title_normalized: Option<String>,
}

/// Reconciliation outcome of one import call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub inserted: usize,
    pub updated: usize,
    pub ignored: usize,
}
