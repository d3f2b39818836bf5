//! Axum router for the auth callback.

use axum::routing::get;
use axum::Router;

use super::handlers::{auth_callback, AuthAppState};

/// Create the auth router, mounted at `/auth`.
///
/// # Routes
/// - `GET /callback` - exchange the provider's auth code and redirect
pub fn auth_router() -> Router<AuthAppState> {
    Router::new().route("/callback", get(auth_callback))
}
