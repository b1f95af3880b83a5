//! Work-item import: batch reconciliation against persisted state.

pub mod ports;
pub mod service;

pub use ports::{DimensionKind, DimensionRepository, WorkItemRepository};
pub use service::ImportService;
