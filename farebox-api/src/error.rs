use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use farebox_core::ValidationError;
use farebox_store::ReservationError;

#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    /// Business-rule rejection; carries the remaining count observed under
    /// the row lock so the client can adjust.
    Conflict { message: String, remaining: i32 },
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::Conflict { message, remaining } => (
                StatusCode::CONFLICT,
                json!({
                    "error": message,
                    "details": { "remaining": remaining },
                }),
            ),
            AppError::Internal(err) => {
                tracing::error!("Internal Server Error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ReservationError> for AppError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::ItemNotFound | ReservationError::SeatNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            ReservationError::InsufficientCapacity { remaining, .. }
            | ReservationError::SeatAlreadyBooked { remaining, .. } => AppError::Conflict {
                message: err.to_string(),
                remaining,
            },
            ReservationError::SeatSelectionRequired | ReservationError::QuantityRequired => {
                AppError::Validation(err.to_string())
            }
            ReservationError::CommitFailed(_) | ReservationError::Database(_) => {
                AppError::Internal(err.into())
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Internal(err.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}
