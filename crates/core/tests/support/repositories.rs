//! Mock repository implementations for testing
//!
//! Provides an in-memory store implementing the import ports, enabling
//! deterministic reconciliation tests without database dependencies.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use flowtrack_core::import::ports::{DimensionKind, DimensionRepository, WorkItemRepository};
use flowtrack_domain::{Result as DomainResult, WorkItemRow};

/// In-memory stand-in for the persistence gateway.
///
/// Work items live in a map keyed by their external ID; dimensions keep
/// insertion order and generate deterministic surrogate keys
/// (`person-1`, `type-2`, ...). `apply` honours the insert-or-ignore
/// contract and counts actual writes.
#[derive(Default)]
pub struct InMemoryStore {
    work_items: Mutex<HashMap<i64, WorkItemRow>>,
    people: Mutex<Vec<DimensionEntry>>,
    types: Mutex<Vec<DimensionEntry>>,
    apply_calls: AtomicUsize,
}

#[derive(Debug, Clone)]
pub struct DimensionEntry {
    pub id: String,
    pub name: String,
    pub canonical: String,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current work item rows.
    pub fn rows(&self) -> Vec<WorkItemRow> {
        let mut rows: Vec<WorkItemRow> =
            self.work_items.lock().expect("lock should not be poisoned").values().cloned().collect();
        rows.sort_by_key(|row| row.id);
        rows
    }

    pub fn people(&self) -> Vec<DimensionEntry> {
        self.people.lock().expect("lock should not be poisoned").clone()
    }

    pub fn types(&self) -> Vec<DimensionEntry> {
        self.types.lock().expect("lock should not be poisoned").clone()
    }

    pub fn apply_calls(&self) -> usize {
        self.apply_calls.load(Ordering::SeqCst)
    }

    fn table(&self, kind: DimensionKind) -> &Mutex<Vec<DimensionEntry>> {
        match kind {
            DimensionKind::Person => &self.people,
            DimensionKind::WorkItemType => &self.types,
        }
    }

    fn key_prefix(kind: DimensionKind) -> &'static str {
        match kind {
            DimensionKind::Person => "person",
            DimensionKind::WorkItemType => "type",
        }
    }
}

#[async_trait]
impl WorkItemRepository for InMemoryStore {
    async fn find_by_ids(&self, ids: &[i64]) -> DomainResult<Vec<WorkItemRow>> {
        let items = self.work_items.lock().expect("lock should not be poisoned");
        Ok(ids.iter().filter_map(|id| items.get(id).cloned()).collect())
    }

    async fn apply(
        &self,
        inserts: &[WorkItemRow],
        updates: &[WorkItemRow],
    ) -> DomainResult<(usize, usize)> {
        self.apply_calls.fetch_add(1, Ordering::SeqCst);
        let mut items = self.work_items.lock().expect("lock should not be poisoned");

        let mut inserted = 0;
        for row in inserts {
            // Insert-or-ignore semantics.
            if !items.contains_key(&row.id) {
                items.insert(row.id, row.clone());
                inserted += 1;
            }
        }

        let mut updated = 0;
        for row in updates {
            if items.contains_key(&row.id) {
                items.insert(row.id, row.clone());
                updated += 1;
            }
        }

        Ok((inserted, updated))
    }
}

#[async_trait]
impl DimensionRepository for InMemoryStore {
    async fn upsert_names(
        &self,
        kind: DimensionKind,
        entries: &[(String, String)],
    ) -> DomainResult<()> {
        let mut table = self.table(kind).lock().expect("lock should not be poisoned");
        for (name, canonical) in entries {
            if table.iter().any(|entry| &entry.canonical == canonical) {
                continue;
            }
            let id = format!("{}-{}", Self::key_prefix(kind), table.len() + 1);
            table.push(DimensionEntry {
                id,
                name: name.clone(),
                canonical: canonical.clone(),
            });
        }
        Ok(())
    }

    async fn load_canonical_map(&self, kind: DimensionKind) -> DomainResult<HashMap<String, String>> {
        let table = self.table(kind).lock().expect("lock should not be poisoned");
        Ok(table.iter().map(|entry| (entry.canonical.clone(), entry.id.clone())).collect())
    }
}
