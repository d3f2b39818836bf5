//! Authenticated-identity types.
//!
//! These types represent the identity the provider hands back after a
//! session exchange. They have no provider dependencies - any identity
//! provider (GoTrue, Zitadel, Auth0) can populate them via the session
//! exchange and current-user ports.

use super::UserId;
use thiserror::Error;

/// The identity attached to an exchanged session.
///
/// Lives for the duration of one callback request; nothing in this service
/// persists it.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the identity provider.
    pub id: UserId,

    /// Email address, when the provider shares it.
    pub email: Option<String>,

    /// Display name, when present in the provider's claims.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user.
    pub fn new(id: UserId, email: Option<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email,
            display_name,
        }
    }

    /// A label safe to show in diagnostics without assuming an email exists.
    pub fn label(&self) -> &str {
        self.email.as_deref().unwrap_or_else(|| self.id.as_str())
    }
}

/// Errors surfaced by the session exchange.
///
/// Only the exchange step fails loudly; the current-user and role-lookup
/// steps fold their failures into "anonymous" and "not admin" respectively.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The provider rejected the auth code (expired, reused, or bogus).
    #[error("Identity provider rejected the auth code")]
    CodeRejected,

    /// The provider could not be reached or answered with a server error.
    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider answered with a body we could not interpret.
    #[error("Malformed identity provider response: {0}")]
    MalformedResponse(String),
}

impl AuthError {
    /// Creates a provider unavailable error with a message.
    pub fn provider_unavailable(message: impl Into<String>) -> Self {
        Self::ProviderUnavailable(message.into())
    }

    /// Returns true if this is a transient error that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::ProviderUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: Option<&str>) -> AuthenticatedUser {
        AuthenticatedUser::new(
            UserId::new("user-123").unwrap(),
            email.map(String::from),
            None,
        )
    }

    #[test]
    fn label_prefers_email() {
        assert_eq!(user(Some("a@example.com")).label(), "a@example.com");
    }

    #[test]
    fn label_falls_back_to_id() {
        assert_eq!(user(None).label(), "user-123");
    }

    #[test]
    fn code_rejection_is_not_transient() {
        assert!(!AuthError::CodeRejected.is_transient());
        assert!(AuthError::provider_unavailable("timeout").is_transient());
    }

    #[test]
    fn auth_error_displays_reason() {
        let err = AuthError::provider_unavailable("connection refused");
        assert_eq!(
            err.to_string(),
            "Identity provider unavailable: connection refused"
        );
    }
}
