//! Post-authentication redirect resolution.
//!
//! The one piece of control flow behind `/auth/callback`: exchange the auth
//! code, fetch the identity, ask the role backend once, and decide where
//! the browser goes. The role lookup is best-effort - it must never block
//! the default redirect on failure, and it is never retried.

use std::sync::Arc;

use crate::domain::foundation::AuthError;
use crate::domain::redirect::{RedirectDecision, RedirectPaths};
use crate::ports::{CallbackParams, CurrentUserAccessor, RoleLookup, SessionExchanger};

/// Resolves an auth callback into a single redirect decision.
///
/// Failure policy: the session exchange fails loudly (the provider's
/// contract); everything after it fails open to the non-privileged path.
/// An anonymous visitor never triggers a role lookup.
pub struct RedirectResolver {
    exchanger: Arc<dyn SessionExchanger>,
    users: Arc<dyn CurrentUserAccessor>,
    roles: Arc<dyn RoleLookup>,
    paths: RedirectPaths,
}

impl RedirectResolver {
    pub fn new(
        exchanger: Arc<dyn SessionExchanger>,
        users: Arc<dyn CurrentUserAccessor>,
        roles: Arc<dyn RoleLookup>,
        paths: RedirectPaths,
    ) -> Self {
        Self {
            exchanger,
            users,
            roles,
            paths,
        }
    }

    /// The configured destination paths.
    pub fn paths(&self) -> &RedirectPaths {
        &self.paths
    }

    /// Runs the callback flow and returns the final redirect path.
    ///
    /// Exactly one decision comes out of every successful exchange; at most
    /// one outbound role lookup is issued per invocation.
    pub async fn resolve(&self, callback: CallbackParams) -> Result<String, AuthError> {
        let session = self
            .exchanger
            .exchange(&callback, &self.paths.default_next)
            .await?;

        let decision = match self.users.current_user(&session).await {
            Some(user) => {
                tracing::debug!(user = %user.label(), "resolving role for authenticated user");
                match self.roles.is_admin(&user.id).await {
                    Ok(true) => RedirectDecision::AdminHome,
                    Ok(false) => RedirectDecision::Next(session.next_path),
                    Err(err) => {
                        // Fail open to the non-privileged path, never to admin.
                        tracing::warn!(user_id = %user.id, error = %err, "role lookup failed, using default redirect");
                        RedirectDecision::Next(session.next_path)
                    }
                }
            }
            None => {
                tracing::debug!("no authenticated identity after exchange, using default redirect");
                RedirectDecision::Next(session.next_path)
            }
        };

        let path = decision.into_path(&self.paths);
        tracing::info!(redirect = %path, "auth callback resolved");
        Ok(path)
    }
}
