use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lunchboard_menu::MenuError;
use serde::Serialize;
use thiserror::Error;

/// Error body returned to API consumers.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into() }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid date: {0}")]
    BadDate(String),

    #[error(transparent)]
    Menu(#[from] MenuError),

    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadDate(msg) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("BAD_DATE", format!("invalid date: {msg}")),
            ),
            AppError::Menu(MenuError::Upstream(e)) => {
                tracing::error!("upstream menu request failed: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    ApiError::new("UPSTREAM", "The menu provider could not be reached"),
                )
            }
            AppError::Menu(MenuError::Format(e)) => {
                tracing::error!("upstream menu data was malformed: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    ApiError::new("UPSTREAM_FORMAT", "The menu provider returned unusable data"),
                )
            }
            AppError::Render(e) => {
                tracing::error!("template rendering failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("INTERNAL", "Internal server error"),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}
