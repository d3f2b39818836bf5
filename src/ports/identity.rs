//! Identity provider ports: session exchange and current-user access.
//!
//! These are the two capabilities the auth callback consumes from the
//! identity provider. Authentication itself (credentials, MFA, session
//! persistence) is entirely the provider's business; the gateway only
//! converts a one-time auth code into an identity it can ask questions
//! about.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// What the provider's callback request carries.
#[derive(Debug, Clone)]
pub struct CallbackParams {
    /// One-time auth code minted by the provider.
    pub code: String,
    /// Path the login flow asked to resume at, if any. Untrusted input.
    pub next: Option<String>,
}

impl CallbackParams {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            next: None,
        }
    }

    pub fn with_next(mut self, next: impl Into<String>) -> Self {
        self.next = Some(next.into());
        self
    }
}

/// An active session produced by a successful exchange.
#[derive(Debug, Clone)]
pub struct EstablishedSession {
    /// Bearer token for the provider's user endpoint / local validation.
    pub access_token: SecretString,
    /// The post-login path: the callback's `next` when safe, else the
    /// configured fallback.
    pub next_path: String,
}

/// Converts a one-time auth code into an active session.
///
/// # Contract
///
/// Implementations must:
/// - Produce a session whose `next_path` is always a usable path (the
///   fallback when the callback carried nothing safe)
/// - Fail loudly on a rejected code or unreachable provider; this is the
///   only step of the callback flow allowed to surface an error
#[async_trait]
pub trait SessionExchanger: Send + Sync {
    async fn exchange(
        &self,
        callback: &CallbackParams,
        fallback_next: &str,
    ) -> Result<EstablishedSession, AuthError>;
}

/// Retrieves the identity behind an established session.
///
/// # Contract
///
/// Absence of an identity is a normal outcome, not an error: an invalid or
/// expired token, a missing subject, or an unreachable key endpoint all
/// yield `None` (logged by the implementation). The caller treats `None` as
/// an anonymous visitor.
#[async_trait]
pub trait CurrentUserAccessor: Send + Sync {
    async fn current_user(&self, session: &EstablishedSession) -> Option<AuthenticatedUser>;
}
