//! # Flowtrack Domain
//!
//! Business domain types and models for Flowtrack.
//!
//! This crate contains:
//! - Work item, person, and work item type data types
//! - Import record shapes and reconciliation summaries
//! - Domain error types and Result definitions
//! - Title/name canonicalization and strict date parsing
//!
//! ## Architecture
//! - No dependencies on other Flowtrack crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod normalize;
pub mod types;

// Re-export commonly used items
pub use errors::{FlowtrackError, Result, ValidationIssue};
pub use normalize::{normalize_title, parse_strict_date, truncate_to_day};
pub use types::*;
