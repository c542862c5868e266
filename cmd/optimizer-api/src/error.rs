use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the optimizer routes
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed client input
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// The optimizer itself failed
    #[error("Optimizer call failed: {0}")]
    Optimizer(#[from] anyhow::Error),
}

/// JSON body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Optimizer(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error = match &self {
            Self::BadRequest(message) | Self::NotFound(message) => message.clone(),
            Self::Optimizer(e) => {
                tracing::error!(error = %e, "Optimizer call failed");
                "Internal server error".to_string()
            }
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
