//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while rendering every
//! failure as a status code plus a `success: false` envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::debug;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TraceId;

use super::envelope::ApiResponse;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned when a path identifier is not an integer.
pub const INVALID_USER_ID: &str = "Invalid user ID";
/// Message returned when a request body cannot be decoded.
pub const INVALID_JSON: &str = "Invalid JSON data";
/// Message returned when name or email is empty.
pub const FIELDS_REQUIRED: &str = "Name and email are required";
/// Message returned for unrouted paths.
pub const RESOURCE_NOT_FOUND: &str = "Resource not found";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        debug!(
            trace_id = TraceId::current().map(|id| id.to_string()),
            status = status.as_u16(),
            message = self.message(),
            "request failed"
        );
        HttpResponse::build(status).json(ApiResponse::<()>::failure(self.message()))
    }
}

/// Fallback handler for unrouted paths.
pub async fn resource_not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found(RESOURCE_NOT_FOUND))
}
