use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use engine::EngineError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Caller-fixable problems keep their message: these errors carry
            // the strategy id and field name for user-facing display.
            AppError::Engine(e @ (EngineError::Core(_) | EngineError::Strategy(_))) => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            AppError::Engine(e @ EngineError::Config(_)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Engine(e) => {
                tracing::error!(error = ?e, "Engine error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal engine error occurred".to_string(),
                )
            }
            AppError::Internal(message) => {
                tracing::error!(error = %message, "Internal error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
