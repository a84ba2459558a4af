//! Request identification and input validation.
//!
//! # Responsibilities
//! - Generate unique request ID (UUID v4) as early as possible
//! - Validate the page query parameter before any store work
//!
//! # Design Decisions
//! - An absent page defaults to 1; a present-but-invalid one is a 400,
//!   mirroring an `integer|min:1` rule
//! - Request ID propagates to the response for correlation

use axum::http::{HeaderValue, Request};
use serde::Deserialize;
use tower_http::request_id::{MakeRequestId, RequestId};

use crate::http::response::ApiError;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// UUID v4 request ID source for `SetRequestIdLayer`.
#[derive(Clone, Copy, Default)]
pub struct MakeCatalogRequestId;

impl MakeRequestId for MakeCatalogRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Raw query parameters for the listing endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

/// Resolve the requested page number.
pub fn validate_page(params: &PageParams) -> Result<u32, ApiError> {
    match &params.page {
        None => Ok(1),
        Some(raw) => match raw.parse::<i64>() {
            Ok(n) if (1..=u32::MAX as i64).contains(&n) => Ok(n as u32),
            Ok(_) => Err(ApiError::validation("page", "must be at least 1")),
            Err(_) => Err(ApiError::validation("page", "must be an integer")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(raw: Option<&str>) -> PageParams {
        PageParams {
            page: raw.map(|s| s.to_string()),
        }
    }

    #[test]
    fn absent_page_defaults_to_one() {
        assert_eq!(validate_page(&params(None)).unwrap(), 1);
    }

    #[test]
    fn positive_integers_pass_through() {
        assert_eq!(validate_page(&params(Some("1"))).unwrap(), 1);
        assert_eq!(validate_page(&params(Some("37"))).unwrap(), 37);
    }

    #[test]
    fn zero_and_negative_are_rejected() {
        for raw in ["0", "-1", "-100"] {
            let err = validate_page(&params(Some(raw))).unwrap_err();
            assert_eq!(err.status().as_u16(), 400, "page={raw}");
        }
    }

    #[test]
    fn non_integers_are_rejected() {
        for raw in ["abc", "1.5", ""] {
            let err = validate_page(&params(Some(raw))).unwrap_err();
            assert_eq!(err.status().as_u16(), 400, "page={raw}");
        }
    }
}
