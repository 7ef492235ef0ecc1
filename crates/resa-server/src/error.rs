//! API error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::state::store::{BookingError, ReservationError};

/// Error returned by any handler, rendered as a JSON body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unprocessable(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::UnknownFlight(_) => ApiError::NotFound(err.to_string()),
            BookingError::NoSeatsRequested => ApiError::Unprocessable(err.to_string()),
            BookingError::InvalidSeat(_) => ApiError::Unprocessable(err.to_string()),
            BookingError::SeatsUnavailable { .. } => ApiError::Conflict(err.to_string()),
        }
    }
}

impl From<ReservationError> for ApiError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::UnknownReservation(_) => ApiError::NotFound(err.to_string()),
            ReservationError::WrongUser { .. } => ApiError::Forbidden(err.to_string()),
            ReservationError::InvalidTransition { .. } => ApiError::Conflict(err.to_string()),
        }
    }
}
