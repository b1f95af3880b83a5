//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use flowtrack_domain::FlowtrackError;
use serde_json::json;
use tracing::error;

/// Wrapper turning a domain error into an HTTP response.
///
/// Validation problems carry their full issue list back to the caller;
/// everything else is logged server-side and answered with an opaque
/// body so storage and upstream details never leak.
pub struct ApiError(pub FlowtrackError);

impl From<FlowtrackError> for ApiError {
    fn from(err: FlowtrackError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            FlowtrackError::Validation(issues) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid_input", "issues": issues })),
            )
                .into_response(),
            FlowtrackError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "not_found", "resource": resource })),
            )
                .into_response(),
            other => {
                error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal_error" })),
                )
                    .into_response()
            }
        }
    }
}
