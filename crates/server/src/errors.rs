use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::customer::errors::CustomerError;

/// Maps orchestrator outcomes onto HTTP statuses: caller-fixable rejections
/// stay 4xx, upstream trouble is a 502, storage faults a 500.
#[derive(Debug)]
pub struct ApiError(pub CustomerError);

impl From<CustomerError> for ApiError {
    fn from(err: CustomerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CustomerError::Validation(_) => StatusCode::BAD_REQUEST,
            CustomerError::NotFound(_) => StatusCode::NOT_FOUND,
            CustomerError::HasActiveAccounts(_) => StatusCode::CONFLICT,
            CustomerError::Gateway(_) => StatusCode::BAD_GATEWAY,
            CustomerError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }
        let body = Json(serde_json::json!({
            "error": self.0.to_string(),
            "code": self.0.code(),
        }));
        (status, body).into_response()
    }
}
