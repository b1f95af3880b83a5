//! People and work item type listing handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use flowtrack_domain::{Person, WorkItemType};
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::ApiError;

/// Query parameters shared by both dimension listings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DimensionQuery {
    id: Option<String>,
    name: Option<String>,
}

/// `GET /people`
pub(crate) async fn list_people(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<DimensionQuery>,
) -> Result<Json<Vec<Person>>, ApiError> {
    let people =
        ctx.dimensions.list_people(query.id.as_deref(), query.name.as_deref()).await?;
    Ok(Json(people))
}

/// `GET /work-item-types`
pub(crate) async fn list_types(
    State(ctx): State<Arc<AppContext>>,
    Query(query): Query<DimensionQuery>,
) -> Result<Json<Vec<WorkItemType>>, ApiError> {
    let types = ctx.dimensions.list_types(query.id.as_deref(), query.name.as_deref()).await?;
    Ok(Json(types))
}
