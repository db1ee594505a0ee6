use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use blokfront_client::ClientError;
use blokfront_validator::ValidationReport;

/// Failures of the JSON form endpoints.
#[derive(Debug)]
pub enum AppError {
    Invalid(ValidationReport),
    Spam,
    Upstream(ClientError),
    FormsDisabled,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Invalid(report) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                serde_json::json!({ "ok": false, "errors": report.errors }),
            ),
            AppError::Spam => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "ok": false, "error": "submission rejected" }),
            ),
            AppError::Upstream(err) => {
                tracing::error!(error = %err, "form delivery failed");
                (
                    StatusCode::BAD_GATEWAY,
                    serde_json::json!({ "ok": false, "error": "submission could not be delivered" }),
                )
            }
            AppError::FormsDisabled => (
                StatusCode::SERVICE_UNAVAILABLE,
                serde_json::json!({ "ok": false, "error": "forms are not configured" }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        Self::Upstream(err)
    }
}
