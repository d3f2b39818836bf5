//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidUserId,

    // Not found errors
    UserNotFound,

    // Directory state errors
    UserExists,
    AlreadyAdmin,
    SelfDeletionForbidden,
    AdminDeletionForbidden,

    // Authorization errors
    AuthenticationRequired,
    AdminRequired,
    AccountDeactivated,

    // Infrastructure errors
    StorageError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidUserId => "INVALID_USER_ID",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::UserExists => "USER_EXISTS",
            ErrorCode::AlreadyAdmin => "ALREADY_ADMIN",
            ErrorCode::SelfDeletionForbidden => "SELF_DELETION_FORBIDDEN",
            ErrorCode::AdminDeletionForbidden => "ADMIN_DELETION_FORBIDDEN",
            ErrorCode::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            ErrorCode::AdminRequired => "ADMIN_REQUIRED",
            ErrorCode::AccountDeactivated => "ACCOUNT_DEACTIVATED",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code and message.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates a storage error wrapping a backend failure.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Creates a user-not-found error.
    pub fn user_not_found() -> Self {
        Self::new(ErrorCode::UserNotFound, "User not found")
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(ErrorCode::ValidationFailed, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_displays_screaming_snake() {
        assert_eq!(ErrorCode::AdminRequired.to_string(), "ADMIN_REQUIRED");
        assert_eq!(ErrorCode::UserNotFound.to_string(), "USER_NOT_FOUND");
    }

    #[test]
    fn domain_error_display_includes_code_and_message() {
        let err = DomainError::new(ErrorCode::UserExists, "duplicate email");
        assert_eq!(err.to_string(), "[USER_EXISTS] duplicate email");
    }

    #[test]
    fn validation_error_converts_to_domain_error() {
        let err: DomainError = ValidationError::empty_field("user_id").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("user_id"));
    }

    #[test]
    fn storage_helper_sets_storage_code() {
        let err = DomainError::storage("connection refused");
        assert_eq!(err.code, ErrorCode::StorageError);
    }
}
