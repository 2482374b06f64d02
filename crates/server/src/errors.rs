use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::CartError;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl From<CartError> for ApiError {
    fn from(e: CartError) -> Self {
        let status = match &e {
            CartError::ProviderMissing => StatusCode::SERVICE_UNAVAILABLE,
            CartError::InvalidProduct(_) => StatusCode::BAD_REQUEST,
            CartError::AlreadyMounted | CartError::Storage(_) | CartError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            error!(code = e.code(), error = %e, "cart request failed");
        }
        Self { status, message: e.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}
