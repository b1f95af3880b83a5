//! Conversions from external infrastructure errors into domain errors.

use flowtrack_domain::FlowtrackError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can
/// be converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub FlowtrackError);

impl From<InfraError> for FlowtrackError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<FlowtrackError> for InfraError {
    fn from(value: FlowtrackError) -> Self {
        Self(value)
    }
}

impl From<SqlError> for InfraError {
    fn from(err: SqlError) -> Self {
        use rusqlite::Error as RE;

        let domain = match err {
            RE::QueryReturnedNoRows => {
                FlowtrackError::NotFound("no rows returned by query".into())
            }
            RE::SqliteFailure(code, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                FlowtrackError::Storage(format!(
                    "sqlite failure {:?} (code {}): {message}",
                    code.code, code.extended_code
                ))
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                FlowtrackError::Storage(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                FlowtrackError::Storage(format!("invalid column type: {ty}"))
            }
            other => FlowtrackError::Storage(other.to_string()),
        };
        Self(domain)
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(err: r2d2::Error) -> Self {
        Self(FlowtrackError::Storage(format!("connection pool error: {err}")))
    }
}

impl From<HttpError> for InfraError {
    fn from(err: HttpError) -> Self {
        let domain = if err.is_timeout() {
            FlowtrackError::Network(format!("request timed out: {err}"))
        } else if err.is_connect() {
            FlowtrackError::Network(format!("connection failed: {err}"))
        } else if err.is_status() {
            let status = err.status().map_or_else(|| "unknown".to_string(), |s| s.to_string());
            FlowtrackError::Network(format!("upstream returned {status}"))
        } else if err.is_decode() {
            FlowtrackError::Network(format!("failed to decode response body: {err}"))
        } else {
            FlowtrackError::Network(err.to_string())
        };
        Self(domain)
    }
}
