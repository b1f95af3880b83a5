//! Work item import and listing handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use flowtrack_core::WorkItemListing;
use flowtrack_domain::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use flowtrack_domain::{
    FlowtrackError, ImportSummary, Page, RawWorkItem, SortDir, ValidationIssue, WorkItemFilter,
};
use serde::Deserialize;
use tracing::instrument;

use crate::context::AppContext;
use crate::error::ApiError;

/// Query parameters accepted by `GET /work-items`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct ListQuery {
    id: Option<i64>,
    parent_id: Option<i64>,
    work_item_type: Option<String>,
    work_item_type_id: Option<String>,
    state: Option<String>,
    assigned_to_id: Option<String>,
    assigned_to: Option<String>,
    title_contains: Option<String>,
    created_from: Option<DateTime<Utc>>,
    created_to: Option<DateTime<Utc>>,
    activated_from: Option<DateTime<Utc>>,
    activated_to: Option<DateTime<Utc>>,
    closed_from: Option<DateTime<Utc>>,
    closed_to: Option<DateTime<Utc>>,
    is_closed: Option<bool>,
    has_parent: Option<bool>,
    limit: Option<u32>,
    offset: Option<u32>,
    sort_by: Option<String>,
    sort_dir: Option<SortDir>,
}

impl ListQuery {
    fn into_parts(self) -> (WorkItemFilter, Page, SortDir) {
        let filter = WorkItemFilter {
            id: self.id,
            parent_id: self.parent_id,
            work_item_type: self.work_item_type,
            work_item_type_id: self.work_item_type_id,
            state: self.state,
            assigned_to_id: self.assigned_to_id,
            assigned_to: self.assigned_to,
            title_contains: self.title_contains,
            created_from: self.created_from,
            created_to: self.created_to,
            activated_from: self.activated_from,
            activated_to: self.activated_to,
            closed_from: self.closed_from,
            closed_to: self.closed_to,
            is_closed: self.is_closed,
            has_parent: self.has_parent,
        };
        let page = match (self.limit, self.offset) {
            (None, None) => Page::default(),
            (limit, offset) => Page::new(limit.unwrap_or(DEFAULT_PAGE_LIMIT), offset.unwrap_or(0)),
        };
        (filter, page, self.sort_dir.unwrap_or_default())
    }

    /// Items only sort by their ID, and an explicit `limit` must fall inside
    /// the supported page range; anything else is rejected rather than
    /// silently ignored or clamped.
    fn validate(&self) -> Result<(), ApiError> {
        if let Some(other) = self.sort_by.as_deref().filter(|sort| *sort != "id") {
            return Err(ApiError(FlowtrackError::validation_single(ValidationIssue {
                path: "sortBy".to_string(),
                message: format!("unsupported sortBy value {other:?}; only \"id\" is available"),
                code: "invalid_sort".to_string(),
            })));
        }
        if let Some(limit) = self.limit.filter(|limit| !(1..=MAX_PAGE_LIMIT).contains(limit)) {
            return Err(ApiError(FlowtrackError::validation_single(ValidationIssue {
                path: "limit".to_string(),
                message: format!("limit must be between 1 and {MAX_PAGE_LIMIT}, got {limit}"),
                code: "out_of_range".to_string(),
            })));
        }
        Ok(())
    }
}

/// `POST /work-items/import` - reconcile one batch against storage.
#[instrument(skip_all, fields(records = payload.len()))]
pub(crate) async fn import(
    State(ctx): State<Arc<AppContext>>,
    Json(payload): Json<Vec<RawWorkItem>>,
) -> Result<Json<ImportSummary>, ApiError> {
    let summary = ctx.import.import_batch(&payload).await?;
    Ok(Json(summary))
}

/// `GET /work-items` - filtered page with development-time annotations.
#[instrument(skip_all)]
pub(crate) async fn list(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<WorkItemListing>, ApiError> {
    query.validate()?;
    let (filter, page, sort) = query.into_parts();
    let listing = ctx.listing.list_with_development_time(&filter, page, sort).await?;
    Ok(Json(listing))
}
