//! Liveness endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::context::AppContext;

/// `GET /health` - unauthenticated database liveness check.
pub(crate) async fn health(State(ctx): State<Arc<AppContext>>) -> impl IntoResponse {
    match ctx.db.health_check() {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "status": "degraded" }))),
    }
}
