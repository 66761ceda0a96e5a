//! Maps [`VizError`] onto HTTP status codes and a uniform JSON error body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vizbroker::VizError;

pub struct ApiError(pub VizError);

impl From<VizError> for ApiError {
    fn from(err: VizError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            VizError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            VizError::Overloaded(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            VizError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            VizError::ExternalFault(msg) | VizError::Fatal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            VizError::Io(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            VizError::ProcessorFault { .. } | VizError::Cancelled => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.0.to_string())
            }
        };
        (status, Json(json!({ "error": detail }))).into_response()
    }
}
