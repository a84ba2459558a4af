//! Response error taxonomy.
//!
//! # Responsibilities
//! - Map every pipeline failure to a terminal HTTP response
//! - Keep bodies stable: callers script against these shapes
//! - Never leak internal detail beyond the named error kind
//!
//! # Design Decisions
//! - Validation and rate-limit bodies use the `success`/`message`
//!   envelope; authorization failures use the bare `error` body
//! - Store failures collapse to an opaque 500; details go to the log

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::catalog::store::StoreError;
use crate::gate::checks::GateRejection;

/// Terminal request failure. None of these are retried by this layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request parameters")]
    Validation { errors: HashMap<String, Vec<String>> },

    #[error("{}", .0.message())]
    Gate(GateRejection),

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Single-field validation failure.
    pub fn validation(field: &str, message: &str) -> Self {
        let mut errors = HashMap::new();
        errors.insert(field.to_string(), vec![message.to_string()]);
        ApiError::Validation { errors }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Gate(rejection) => rejection.status(),
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<GateRejection> for ApiError {
    fn from(rejection: GateRejection) -> Self {
        ApiError::Gate(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation { errors } => (
                status,
                Json(json!({
                    "success": false,
                    "message": "Invalid request parameters",
                    "errors": errors,
                })),
            )
                .into_response(),
            ApiError::Gate(rejection) => {
                (status, Json(json!({ "error": rejection.message() }))).into_response()
            }
            ApiError::RateLimited => (
                status,
                Json(json!({
                    "success": false,
                    "message": "Too many requests. Please try again later.",
                })),
            )
                .into_response(),
            ApiError::Store(e) => {
                tracing::error!(error = %e, "Catalog store failure");
                (status, Json(json!({ "error": "Internal server error" }))).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(ApiError::validation("page", "bad").status().as_u16(), 400);
        assert_eq!(
            ApiError::Gate(GateRejection::Unauthenticated).status().as_u16(),
            401
        );
        assert_eq!(
            ApiError::Gate(GateRejection::NotOwner).status().as_u16(),
            403
        );
        assert_eq!(ApiError::RateLimited.status().as_u16(), 429);
        assert_eq!(
            ApiError::Store(StoreError::Unavailable("down".into()))
                .status()
                .as_u16(),
            500
        );
    }

    #[test]
    fn gate_error_displays_its_message() {
        let err = ApiError::Gate(GateRejection::OutsideBusinessHours);
        assert_eq!(err.to_string(), "Access restricted to business hours");
    }
}
