//! SQLite-backed dimension repository: people and work item types.
//!
//! Writes are insert-if-absent on the `name_normalized` uniqueness key,
//! so the first display name seen for a canonical name is kept forever
//! and concurrent imports introducing the same name cannot corrupt the
//! table.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use flowtrack_core::import::ports::{DimensionKind, DimensionRepository};
use flowtrack_core::listing::ports::DimensionQueryRepository;
use flowtrack_domain::{Person, Result, WorkItemType};
use rusqlite::params;
use tracing::instrument;
use uuid::Uuid;

use super::manager::SqlitePool;
use crate::errors::InfraError;

/// SQLite implementation of the dimension ports.
pub struct SqliteDimensionRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteDimensionRepository {
    /// Create a new repository over the shared pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    fn list_rows(
        &self,
        table: &str,
        id: Option<&str>,
        name_contains: Option<&str>,
    ) -> Result<Vec<(String, String, String)>> {
        let conn = self.pool.get().map_err(InfraError::from)?;

        let mut sql =
            format!("SELECT id, name, name_normalized FROM {table}");
        let mut clauses = Vec::new();
        let mut params_vec: Vec<rusqlite::types::Value> = Vec::new();

        if let Some(id) = id {
            clauses.push("id = ?");
            params_vec.push(id.to_string().into());
        }
        if let Some(needle) = name_contains {
            clauses.push("LOWER(name) LIKE ?");
            params_vec.push(format!("%{}%", needle.to_lowercase()).into());
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY name ASC");

        let mut stmt = conn.prepare(&sql).map_err(InfraError::from)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params_vec), |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .map_err(InfraError::from)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(InfraError::from)?;
        Ok(rows)
    }
}

const fn table_name(kind: DimensionKind) -> &'static str {
    match kind {
        DimensionKind::Person => "people",
        DimensionKind::WorkItemType => "work_item_types",
    }
}

#[async_trait]
impl DimensionRepository for SqliteDimensionRepository {
    #[instrument(skip(self, entries), fields(kind = ?kind, entries = entries.len()))]
    async fn upsert_names(&self, kind: DimensionKind, entries: &[(String, String)]) -> Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let conn = self.pool.get().map_err(InfraError::from)?;
        let table = table_name(kind);
        let now = Utc::now().timestamp();

        let mut stmt = conn
            .prepare(&format!(
                "INSERT OR IGNORE INTO {table} (id, name, name_normalized, created_at)
                 VALUES (?1, ?2, ?3, ?4)"
            ))
            .map_err(InfraError::from)?;

        for (name, canonical) in entries {
            stmt.execute(params![Uuid::new_v4().to_string(), name, canonical, now])
                .map_err(InfraError::from)?;
        }
        Ok(())
    }

    async fn load_canonical_map(&self, kind: DimensionKind) -> Result<HashMap<String, String>> {
        let conn = self.pool.get().map_err(InfraError::from)?;
        let table = table_name(kind);

        let mut stmt = conn
            .prepare(&format!("SELECT name_normalized, id FROM {table}"))
            .map_err(InfraError::from)?;
        let map = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .map_err(InfraError::from)?
            .collect::<rusqlite::Result<HashMap<String, String>>>()
            .map_err(InfraError::from)?;
        Ok(map)
    }
}

#[async_trait]
impl DimensionQueryRepository for SqliteDimensionRepository {
    async fn list_people(&self, id: Option<&str>, name_contains: Option<&str>) -> Result<Vec<Person>> {
        Ok(self
            .list_rows(table_name(DimensionKind::Person), id, name_contains)?
            .into_iter()
            .map(|(id, name, name_normalized)| Person { id, name, name_normalized })
            .collect())
    }

    async fn list_types(
        &self,
        id: Option<&str>,
        name_contains: Option<&str>,
    ) -> Result<Vec<WorkItemType>> {
        Ok(self
            .list_rows(table_name(DimensionKind::WorkItemType), id, name_contains)?
            .into_iter()
            .map(|(id, name, name_normalized)| WorkItemType { id, name, name_normalized })
            .collect())
    }
}
