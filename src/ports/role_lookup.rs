//! Role lookup port - "is this user an administrator?".

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::UserId;

/// Ways a role lookup can fail.
///
/// The resolver treats every variant identically (fold to "not admin"), but
/// keeping them distinct lets the log say what actually happened.
#[derive(Debug, Clone, Error)]
pub enum RoleLookupError {
    /// The backend could not be reached (DNS, refused, timed out).
    #[error("role lookup request failed: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("role lookup returned status {0}")]
    Status(u16),

    /// The backend answered 2xx but the body did not match the expected
    /// shape.
    #[error("role lookup returned malformed body: {0}")]
    Malformed(String),
}

/// Asks the role backend whether a user is an administrator.
///
/// # Contract
///
/// Implementations must:
/// - Issue at most one outbound request per call, with caching disabled so
///   the answer reflects live role state
/// - Bound the request with a timeout; a hung backend must not hang the
///   caller indefinitely
/// - Report `Ok(true)` only when the backend affirmatively said so; every
///   failure mode maps onto one `RoleLookupError` variant, never a panic
#[async_trait]
pub trait RoleLookup: Send + Sync {
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, RoleLookupError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_their_cause() {
        assert!(RoleLookupError::Network("refused".into())
            .to_string()
            .contains("refused"));
        assert_eq!(
            RoleLookupError::Status(500).to_string(),
            "role lookup returned status 500"
        );
    }

    #[test]
    fn role_lookup_is_object_safe() {
        fn _accepts(_lookup: &dyn RoleLookup) {}
    }
}
