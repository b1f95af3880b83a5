//! SQLite-backed listing reads: filterable work item queries.
//!
//! Builds the WHERE clause dynamically from the filter set; joins are
//! always present because type/assignee name filters reference the
//! dimension tables.

use std::sync::Arc;

use async_trait::async_trait;
use flowtrack_core::listing::ports::WorkItemQueryRepository;
use flowtrack_domain::{
    Page, Result, SortDir, WorkItemDates, WorkItemFilter, WorkItemView,
};
use rusqlite::types::Value;
use rusqlite::Row;
use tracing::instrument;

use super::manager::SqlitePool;
use super::work_item_repository::epoch_to_instant;
use crate::errors::InfraError;

const FROM_JOINED: &str = "FROM work_items wi
     JOIN work_item_types wt ON wt.id = wi.work_item_type_id
     LEFT JOIN people p ON p.id = wi.assigned_to_id";

/// SQLite implementation of the work item listing port.
pub struct SqliteWorkItemQueryRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteWorkItemQueryRepository {
    /// Create a new query repository over the shared pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    fn count_with(&self, filter: &WorkItemFilter, extra: Option<&str>) -> Result<u64> {
        let conn = self.pool.get().map_err(InfraError::from)?;
        let (mut where_sql, params) = build_where(filter);
        if let Some(extra) = extra {
            if where_sql.is_empty() {
                where_sql = format!(" WHERE {extra}");
            } else {
                where_sql.push_str(" AND ");
                where_sql.push_str(extra);
            }
        }

        let sql = format!("SELECT COUNT(*) {FROM_JOINED}{where_sql}");
        let count: i64 = conn
            .query_row(&sql, rusqlite::params_from_iter(params), |row| row.get(0))
            .map_err(InfraError::from)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

#[async_trait]
impl WorkItemQueryRepository for SqliteWorkItemQueryRepository {
    #[instrument(skip(self, filter), fields(limit = page.limit, offset = page.offset))]
    async fn list_filtered(
        &self,
        filter: &WorkItemFilter,
        page: Page,
        sort: SortDir,
    ) -> Result<Vec<WorkItemView>> {
        let conn = self.pool.get().map_err(InfraError::from)?;
        let (where_sql, mut params) = build_where(filter);

        let order = match sort {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        };
        let sql = format!(
            "SELECT wi.id, wi.work_item_type_id, wt.name, wi.state, wi.created_date,
                    wi.activated_date, wi.closed_date, wi.title, wi.description,
                    wi.assigned_to_id, p.name, wi.parent_id
             {FROM_JOINED}{where_sql}
             ORDER BY wi.id {order}
             LIMIT ? OFFSET ?"
        );
        params.push(Value::Integer(i64::from(page.limit)));
        params.push(Value::Integer(i64::from(page.offset)));

        let mut stmt = conn.prepare(&sql).map_err(InfraError::from)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params), row_to_view)
            .map_err(InfraError::from)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(InfraError::from)?;
        Ok(rows)
    }

    async fn count_filtered(&self, filter: &WorkItemFilter) -> Result<u64> {
        self.count_with(filter, None)
    }

    async fn count_closed_filtered(&self, filter: &WorkItemFilter) -> Result<u64> {
        self.count_with(filter, Some("wi.closed_date IS NOT NULL"))
    }

    async fn list_dates_for_summary(&self, filter: &WorkItemFilter) -> Result<Vec<WorkItemDates>> {
        let conn = self.pool.get().map_err(InfraError::from)?;
        let (where_sql, params) = build_where(filter);

        let sql = format!(
            "SELECT wi.state, wi.created_date, wi.activated_date, wi.closed_date
             {FROM_JOINED}{where_sql}"
        );
        let mut stmt = conn.prepare(&sql).map_err(InfraError::from)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(params), |row| {
                Ok(WorkItemDates {
                    state: row.get(0)?,
                    created_date: epoch_to_instant(row.get(1)?),
                    activated_date: row.get::<_, Option<i64>>(2)?.map(epoch_to_instant),
                    closed_date: row.get::<_, Option<i64>>(3)?.map(epoch_to_instant),
                })
            })
            .map_err(InfraError::from)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(InfraError::from)?;
        Ok(rows)
    }
}

fn row_to_view(row: &Row<'_>) -> rusqlite::Result<WorkItemView> {
    Ok(WorkItemView {
        id: row.get(0)?,
        work_item_type_id: row.get(1)?,
        work_item_type: row.get(2)?,
        state: row.get(3)?,
        created_date: epoch_to_instant(row.get(4)?),
        activated_date: row.get::<_, Option<i64>>(5)?.map(epoch_to_instant),
        closed_date: row.get::<_, Option<i64>>(6)?.map(epoch_to_instant),
        title: row.get(7)?,
        description: row.get(8)?,
        assigned_to_id: row.get(9)?,
        assigned_to: row.get(10)?,
        parent_id: row.get(11)?,
        // Filled in by the listing service.
        development_business_days: None,
    })
}

/// Build the WHERE clause and its positional parameters from the filter.
fn build_where(filter: &WorkItemFilter) -> (String, Vec<Value>) {
    let mut clauses: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    let mut push = |clause: String, value: Value| {
        clauses.push(clause);
        params.push(value);
    };

    if let Some(id) = filter.id {
        push("wi.id = ?".into(), Value::Integer(id));
    }
    if let Some(parent_id) = filter.parent_id {
        push("wi.parent_id = ?".into(), Value::Integer(parent_id));
    }
    if let Some(type_id) = &filter.work_item_type_id {
        push("wi.work_item_type_id = ?".into(), Value::Text(type_id.clone()));
    }
    if let Some(type_name) = &filter.work_item_type {
        push("LOWER(wt.name) LIKE ?".into(), like_needle(type_name));
    }
    if let Some(state) = &filter.state {
        push("wi.state = ?".into(), Value::Text(state.clone()));
    }
    if let Some(assignee_id) = &filter.assigned_to_id {
        push("wi.assigned_to_id = ?".into(), Value::Text(assignee_id.clone()));
    }
    if let Some(assignee) = &filter.assigned_to {
        push("LOWER(p.name) LIKE ?".into(), like_needle(assignee));
    }
    if let Some(title) = &filter.title_contains {
        push("LOWER(wi.title) LIKE ?".into(), like_needle(title));
    }

    let date_ranges = [
        ("wi.created_date", filter.created_from, filter.created_to),
        ("wi.activated_date", filter.activated_from, filter.activated_to),
        ("wi.closed_date", filter.closed_from, filter.closed_to),
    ];
    for (column, from, to) in date_ranges {
        if let Some(from) = from {
            push(format!("{column} >= ?"), Value::Integer(from.timestamp()));
        }
        if let Some(to) = to {
            push(format!("{column} <= ?"), Value::Integer(to.timestamp()));
        }
    }

    match filter.is_closed {
        Some(true) => clauses.push("wi.closed_date IS NOT NULL".to_string()),
        Some(false) => clauses.push("wi.closed_date IS NULL".to_string()),
        None => {}
    }
    match filter.has_parent {
        Some(true) => clauses.push("wi.parent_id IS NOT NULL".to_string()),
        Some(false) => clauses.push("wi.parent_id IS NULL".to_string()),
        None => {}
    }

    if clauses.is_empty() {
        (String::new(), params)
    } else {
        (format!(" WHERE {}", clauses.join(" AND ")), params)
    }
}

fn like_needle(needle: &str) -> Value {
    Value::Text(format!("%{}%", needle.to_lowercase()))
}
