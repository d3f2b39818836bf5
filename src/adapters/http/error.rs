//! Domain-error to HTTP-response mapping.

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// JSON error body returned by every non-success response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Wrapper turning a `DomainError` into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError(err)
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::AuthenticationRequired => StatusCode::UNAUTHORIZED,
        ErrorCode::AdminRequired | ErrorCode::AccountDeactivated => StatusCode::FORBIDDEN,
        ErrorCode::UserNotFound => StatusCode::NOT_FOUND,
        ErrorCode::ValidationFailed
        | ErrorCode::InvalidUserId
        | ErrorCode::UserExists
        | ErrorCode::AlreadyAdmin
        | ErrorCode::SelfDeletionForbidden
        | ErrorCode::AdminDeletionForbidden => StatusCode::BAD_REQUEST,
        ErrorCode::StorageError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.code);
        if status.is_server_error() {
            tracing::error!(code = %self.0.code, error = %self.0.message, "request failed");
        }
        let body = ErrorResponse::new(self.0.code.to_string(), self.0.message);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_errors_map_to_forbidden() {
        assert_eq!(status_for(ErrorCode::AdminRequired), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorCode::AccountDeactivated), StatusCode::FORBIDDEN);
    }

    #[test]
    fn missing_auth_maps_to_unauthorized() {
        assert_eq!(
            status_for(ErrorCode::AuthenticationRequired),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn directory_state_errors_map_to_bad_request() {
        assert_eq!(status_for(ErrorCode::AlreadyAdmin), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(ErrorCode::SelfDeletionForbidden),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn storage_errors_map_to_internal() {
        assert_eq!(
            status_for(ErrorCode::StorageError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
