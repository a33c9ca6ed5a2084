//! API error handling for the upload endpoint.
//!
//! Transport failures use the same `{code, message}` envelope as regular
//! responses so clients only ever parse one shape.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::upload::{MessageCatalog, ResponsePayload, ResultCode};

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    payload: ResponsePayload,
}

impl ApiError {
    /// Create an error with an explicit HTTP status.
    pub fn new(status: StatusCode, catalog: &MessageCatalog, code: ResultCode) -> Self {
        Self {
            status,
            payload: ResponsePayload::rejected(catalog, code),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(catalog: &MessageCatalog, code: ResultCode) -> Self {
        Self::new(StatusCode::BAD_REQUEST, catalog, code)
    }

    /// Create an internal server error.
    pub fn internal(catalog: &MessageCatalog, code: ResultCode) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, catalog, code)
    }

    /// Create an error for a body over the server limit.
    pub fn payload_too_large(catalog: &MessageCatalog, code: ResultCode) -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, catalog, code)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.payload)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.payload.code, self.payload.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let catalog = MessageCatalog::builtin();

        let err = ApiError::bad_request(&catalog, ResultCode::MissingFields);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.payload.code, ResultCode::MissingFields);

        let err = ApiError::internal(&catalog, ResultCode::StagingFailed);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.payload.code, ResultCode::StagingFailed);

        let err = ApiError::payload_too_large(&catalog, ResultCode::FileTooLarge);
        assert_eq!(err.status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.payload.code, ResultCode::FileTooLarge);
    }

    #[test]
    fn test_display() {
        let catalog = MessageCatalog::builtin();
        let err = ApiError::bad_request(&catalog, ResultCode::MissingFields);
        assert_eq!(err.to_string(), "10001: Request fields are missing");
    }

    #[test]
    fn test_into_response_status() {
        let catalog = MessageCatalog::builtin();
        let response = ApiError::internal(&catalog, ResultCode::StagingFailed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
