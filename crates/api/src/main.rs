//! flowtrack entry point.
//!
//! Intentionally thin: load configuration, set up tracing, wire the
//! application context, and start the HTTP server. All handlers live
//! in `routes`; all service wiring lives in `context`.

use std::sync::Arc;

use anyhow::Context as _;
use flowtrack_api::{build_router, AppContext};
use flowtrack_infra::AppConfig;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Silent if the file does not exist; production injects env vars directly.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = AppConfig::from_env().context("configuration is invalid")?;
    let ctx = Arc::new(AppContext::new(&config).context("failed to wire services")?);

    let app = build_router(ctx).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    info!("flowtrack listening on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("failed to bind listen address")?;
    axum::serve(listener, app).await.context("server crashed")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
