//! SQLite-backed implementations of the core persistence ports.

pub mod dimension_repository;
pub mod manager;
pub mod query_repository;
pub mod work_item_repository;

pub use dimension_repository::SqliteDimensionRepository;
pub use manager::{DbManager, PooledSqliteConnection, SqlitePool};
pub use query_repository::SqliteWorkItemQueryRepository;
pub use work_item_repository::SqliteWorkItemRepository;
