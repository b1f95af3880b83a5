//! SQLite-backed implementation of the WorkItemRepository port.
//!
//! Instants are stored as unix epoch seconds; the import date format has
//! minute precision, so nothing is lost. `created_at` / `updated_at` are
//! bookkeeping columns owned by this repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use flowtrack_core::import::ports::WorkItemRepository;
use flowtrack_domain::{Result, WorkItemRow};
use rusqlite::{params, Row};
use tracing::{debug, instrument};

use super::manager::SqlitePool;
use crate::errors::InfraError;

/// SQLite implementation of the work item persistence gateway.
pub struct SqliteWorkItemRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteWorkItemRepository {
    /// Create a new repository over the shared pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkItemRepository for SqliteWorkItemRepository {
    #[instrument(skip(self), fields(ids = ids.len()))]
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<WorkItemRow>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.pool.get().map_err(InfraError::from)?;

        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT id, work_item_type_id, state, created_date, activated_date, closed_date,
                    title, description, assigned_to_id, parent_id
             FROM work_items
             WHERE id IN ({placeholders})"
        );

        let mut stmt = conn.prepare(&sql).map_err(InfraError::from)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(ids.iter()), row_to_work_item)
            .map_err(InfraError::from)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(InfraError::from)?;

        debug!(requested = ids.len(), found = rows.len(), "existing work items fetched");
        Ok(rows)
    }

    #[instrument(skip_all, fields(inserts = inserts.len(), updates = updates.len()))]
    async fn apply(&self, inserts: &[WorkItemRow], updates: &[WorkItemRow]) -> Result<(usize, usize)> {
        let mut conn = self.pool.get().map_err(InfraError::from)?;
        let now = Utc::now().timestamp();

        // One transaction for both bulk phases; dropping it without a
        // commit rolls everything back.
        let tx = conn.transaction().map_err(InfraError::from)?;

        let mut inserted = 0;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT OR IGNORE INTO work_items (
                        id, work_item_type_id, state, created_date, activated_date,
                        closed_date, title, description, assigned_to_id, parent_id,
                        created_at, updated_at
                     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                )
                .map_err(InfraError::from)?;

            for row in inserts {
                inserted += stmt
                    .execute(params![
                        row.id,
                        row.work_item_type_id,
                        row.state,
                        row.created_date.timestamp(),
                        row.activated_date.map(|dt| dt.timestamp()),
                        row.closed_date.map(|dt| dt.timestamp()),
                        row.title,
                        row.description,
                        row.assigned_to_id,
                        row.parent_id,
                        now,
                        now,
                    ])
                    .map_err(InfraError::from)?;
            }
        }

        let mut updated = 0;
        {
            let mut stmt = tx
                .prepare(
                    "UPDATE work_items SET
                        work_item_type_id = ?2, state = ?3, created_date = ?4,
                        activated_date = ?5, closed_date = ?6, title = ?7,
                        description = ?8, assigned_to_id = ?9, parent_id = ?10,
                        updated_at = ?11
                     WHERE id = ?1",
                )
                .map_err(InfraError::from)?;

            for row in updates {
                updated += stmt
                    .execute(params![
                        row.id,
                        row.work_item_type_id,
                        row.state,
                        row.created_date.timestamp(),
                        row.activated_date.map(|dt| dt.timestamp()),
                        row.closed_date.map(|dt| dt.timestamp()),
                        row.title,
                        row.description,
                        row.assigned_to_id,
                        row.parent_id,
                        now,
                    ])
                    .map_err(InfraError::from)?;
            }
        }

        tx.commit().map_err(InfraError::from)?;
        Ok((inserted, updated))
    }
}

fn row_to_work_item(row: &Row<'_>) -> rusqlite::Result<WorkItemRow> {
    Ok(WorkItemRow {
        id: row.get(0)?,
        work_item_type_id: row.get(1)?,
        state: row.get(2)?,
        created_date: epoch_to_instant(row.get(3)?),
        activated_date: row.get::<_, Option<i64>>(4)?.map(epoch_to_instant),
        closed_date: row.get::<_, Option<i64>>(5)?.map(epoch_to_instant),
        title: row.get(6)?,
        description: row.get(7)?,
        assigned_to_id: row.get(8)?,
        parent_id: row.get(9)?,
    })
}

/// Convert stored epoch seconds back into an instant.
pub(crate) fn epoch_to_instant(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_else(|| {
        // Stored values were produced by `timestamp()`; out-of-range can
        // only mean corruption, surface the epoch instead of panicking.
        DateTime::<Utc>::UNIX_EPOCH
    })
}