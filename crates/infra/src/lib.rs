//! # Flowtrack Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite repository implementations (work items, dimensions, listing)
//! - The BrasilAPI-backed holiday source
//! - Configuration loading
//! - Error conversions from infrastructure crates into domain errors
//!
//! ## Architecture
//! - Implements traits defined in `flowtrack-core`
//! - Depends on `flowtrack-domain` and `flowtrack-core`
//! - Contains all "impure" code (database, HTTP)

pub mod config;
pub mod database;
pub mod errors;
pub mod holidays;

// Re-export commonly used items
pub use config::AppConfig;
pub use database::{
    DbManager, SqliteDimensionRepository, SqliteWorkItemQueryRepository, SqliteWorkItemRepository,
};
pub use errors::InfraError;
pub use holidays::BrasilApiHolidaySource;
