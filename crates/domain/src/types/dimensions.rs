//! Dimension rows: people and work item types.
//!
//! Both are created lazily during import, keyed by a generated surrogate
//! key, unique on the canonicalized name. The core never updates or
//! deletes them.

use serde::{Deserialize, Serialize};

/// A person that work items can be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub name: String,
    pub name_normalized: String,
}

/// A work item type (Feature, User Story, Bug, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemType {
    pub id: String,
    pub name: String,
    pub name_normalized: String,
}
