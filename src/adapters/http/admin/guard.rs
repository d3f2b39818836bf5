//! Admin guard extractor.
//!
//! Proves the caller is an active admin before a guarded handler runs. The
//! caller's identity arrives in the `X-Admin-User-ID` header (set by the
//! frontend after its own role check); the registry is consulted on every
//! request, so a demotion or deactivation takes effect immediately.

use axum::extract::FromRef;

use crate::adapters::http::ApiError;
use crate::application::AdminContext;

use super::handlers::AdminAppState;

/// Extractor that requires an active admin caller.
///
/// # Example
///
/// ```ignore
/// async fn guarded(AdminGuard(admin): AdminGuard) -> impl IntoResponse {
///     format!("hello, {}", admin.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminGuard(pub AdminContext);

impl<S> axum::extract::FromRequestParts<S> for AdminGuard
where
    S: Send + Sync,
    AdminAppState: FromRef<S>,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        let state = AdminAppState::from_ref(state);
        Box::pin(async move {
            let user_id = parts
                .headers
                .get("x-admin-user-id")
                .and_then(|v| v.to_str().ok());
            let email = parts
                .headers
                .get("x-admin-email")
                .and_then(|v| v.to_str().ok());

            let admin = state.directory.require_admin(user_id, email).await?;
            Ok(AdminGuard(admin))
        })
    }
}
