//! Axum router and HTTP handlers.
//!
//! `build_router` is the single entry point; `main.rs` attaches the
//! tracing middleware after this call so tests can drive the bare
//! router in-process.

mod dimensions;
mod health;
mod work_items;

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use crate::auth;
use crate::context::AppContext;

/// Build the complete application router wired to the given context.
///
/// Every route except `GET /health` sits behind the bearer-token check.
pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let protected = Router::new()
        .route("/work-items/import", post(work_items::import))
        .route("/work-items", get(work_items::list))
        .route("/people", get(dimensions::list_people))
        .route("/work-item-types", get(dimensions::list_types))
        .route_layer(middleware::from_fn_with_state(Arc::clone(&ctx), auth::require_bearer));

    Router::new()
        .route("/health", get(health::health))
        .merge(protected)
        .with_state(ctx)
}
