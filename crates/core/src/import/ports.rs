//! Port interfaces for the import reconciliation engine
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use flowtrack_domain::{Result, WorkItemRow};

/// The two name-resolved dimension tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionKind {
    Person,
    WorkItemType,
}

/// Write/read contract the engine needs for work item rows.
#[async_trait]
pub trait WorkItemRepository: Send + Sync {
    /// Fetch existing rows for the given IDs in one call.
    ///
    /// Empty input short-circuits to an empty result.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<WorkItemRow>>;

    /// Execute the classified write phase: all inserts and all updates,
    /// inside a single transaction that rolls back wholesale on any
    /// failure.
    ///
    /// Inserts must ignore rows whose primary key already exists
    /// (defensive idempotence); updates overwrite every tracked field and
    /// touch the row's updated-timestamp. Returns `(inserted, updated)`.
    async fn apply(&self, inserts: &[WorkItemRow], updates: &[WorkItemRow]) -> Result<(usize, usize)>;
}

/// Insert-if-absent upsert plus full reread for a dimension table.
///
/// The two-phase protocol (upsert batch, then full-table read) avoids
/// needing the store to return generated keys for skipped conflicting
/// rows; the dimension tables are small enough that the extra scan per
/// import is acceptable.
#[async_trait]
pub trait DimensionRepository: Send + Sync {
    /// Insert `(display name, canonical name)` pairs, keyed on the
    /// canonical name. Existing rows are left untouched — the first
    /// display name seen for a canonical name wins forever.
    async fn upsert_names(&self, kind: DimensionKind, entries: &[(String, String)]) -> Result<()>;

    /// Read the full dimension table as a canonical-name → surrogate-key
    /// map.
    async fn load_canonical_map(&self, kind: DimensionKind) -> Result<HashMap<String, String>>;
}
