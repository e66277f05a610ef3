//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cinebus_core::Error;

use crate::dto::ErrorResponse;

#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    /// Valid request the city model cannot serve, e.g. a point outside the city
    Unprocessable { message: String },
    NotFound { message: String },
    Timeout,
    Internal { message: String },
}

impl From<Error> for AppError {
    fn from(e: Error) -> Self {
        match e {
            Error::OutOfServiceArea { .. } => AppError::Unprocessable {
                message: e.to_string(),
            },
            Error::NoPathFound => AppError::NotFound {
                message: e.to_string(),
            },
            Error::InvalidData(message) => AppError::BadRequest { message },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(e: tokio::task::JoinError) -> Self {
        AppError::Internal {
            message: format!("query task failed: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "request took too long".to_string(),
            ),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            tracing::error!(%status, "{message}");
        } else {
            tracing::debug!(%status, "{message}");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
