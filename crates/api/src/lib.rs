//! # Flowtrack API
//!
//! HTTP surface of the work-item flow tracking service.
//!
//! This crate contains:
//! - The axum router and request handlers
//! - Bearer-token authentication middleware
//! - The application context wiring configuration to services
//! - Domain-error to HTTP-response mapping
//!
//! The binary entry point lives in `main.rs`; everything here is also
//! exported so integration tests can drive the router in-process.

pub mod auth;
pub mod context;
pub mod error;
pub mod routes;

pub use context::AppContext;
pub use error::ApiError;
pub use routes::build_router;
