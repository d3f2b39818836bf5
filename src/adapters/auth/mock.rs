//! Mock identity provider for testing.
//!
//! Implements both identity ports without a real auth server. Exchanges
//! succeed with a fixed token unless an error is forced, and the current
//! user is whatever the test configured.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::domain::redirect::safe_next_path;
use crate::ports::{CallbackParams, CurrentUserAccessor, EstablishedSession, SessionExchanger};

/// Mock implementation of the identity ports.
#[derive(Debug, Default)]
pub struct MockIdentityProvider {
    user: RwLock<Option<AuthenticatedUser>>,
    exchange_error: RwLock<Option<AuthError>>,
    exchanges: AtomicUsize,
}

impl MockIdentityProvider {
    /// A provider whose sessions belong to nobody (anonymous visitor).
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every exchanged session resolve to the given user.
    pub fn with_user(self, user: AuthenticatedUser) -> Self {
        *self.user.write().unwrap() = Some(user);
        self
    }

    /// Convenience: a user with the given id and a derived email.
    pub fn with_test_user(self, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let user = AuthenticatedUser::new(
            UserId::new(&user_id).unwrap(),
            Some(format!("{}@test.example.com", user_id)),
            None,
        );
        self.with_user(user)
    }

    /// Forces every exchange to fail with the given error.
    pub fn with_exchange_error(self, error: AuthError) -> Self {
        *self.exchange_error.write().unwrap() = Some(error);
        self
    }

    /// Number of exchange calls seen so far.
    pub fn exchange_count(&self) -> usize {
        self.exchanges.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionExchanger for MockIdentityProvider {
    async fn exchange(
        &self,
        callback: &CallbackParams,
        fallback_next: &str,
    ) -> Result<EstablishedSession, AuthError> {
        self.exchanges.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.exchange_error.read().unwrap().clone() {
            return Err(error);
        }
        Ok(EstablishedSession {
            access_token: SecretString::new("mock-access-token".to_string()),
            next_path: safe_next_path(callback.next.as_deref(), fallback_next),
        })
    }
}

#[async_trait]
impl CurrentUserAccessor for MockIdentityProvider {
    async fn current_user(&self, _session: &EstablishedSession) -> Option<AuthenticatedUser> {
        self.user.read().unwrap().clone()
    }
}
