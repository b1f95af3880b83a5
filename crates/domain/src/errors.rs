//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level problem found while validating an import batch.
///
/// `path` points at the offending field (for example
/// `items[3]."created date"`), `code` is a stable machine-readable
/// discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
    pub code: String,
}

impl ValidationIssue {
    /// Build an issue for a field of the record at `index` in a batch.
    ///
    /// Field names containing spaces are quoted, mirroring the external
    /// key convention (`items[0]."work item type"`).
    pub fn for_record_field(index: usize, field: &str, message: impl Into<String>, code: &str) -> Self {
        let path = if field.contains(' ') {
            format!("items[{index}].\"{field}\"")
        } else {
            format!("items[{index}].{field}")
        };
        Self { path, message: message.into(), code: code.to_string() }
    }

    /// Build an issue that applies to the batch as a whole.
    pub fn for_batch(message: impl Into<String>, code: &str) -> Self {
        Self { path: "items".to_string(), message: message.into(), code: code.to_string() }
    }
}

/// Main error type for Flowtrack
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum FlowtrackError {
    /// The import batch was rejected wholesale; no partial write happened.
    #[error("validation failed with {} issue(s)", .0.len())]
    Validation(Vec<ValidationIssue>),

    #[error("Database error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FlowtrackError {
    /// Convenience constructor for a single-issue validation failure.
    pub fn validation_single(issue: ValidationIssue) -> Self {
        Self::Validation(vec![issue])
    }
}

/// Result type alias for Flowtrack operations
pub type Result<T> = std::result::Result<T, FlowtrackError>;
