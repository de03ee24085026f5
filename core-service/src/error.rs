use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bridge_traits::error::BridgeError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Core initialization failed: {0}")]
    InitializationFailed(String),

    #[error(transparent)]
    Config(#[from] core_runtime::Error),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl CoreError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CoreError::Bridge(BridgeError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            CoreError::Bridge(BridgeError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            CoreError::Bridge(BridgeError::Upstream(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error = if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
            tracing::error!(error = %self, "Request failed");
            "An internal server error occurred".to_string()
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request failed");
            self.to_string()
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
