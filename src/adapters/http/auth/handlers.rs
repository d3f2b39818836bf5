//! HTTP handler for the auth callback.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;

use crate::adapters::http::ErrorResponse;
use crate::application::RedirectResolver;
use crate::ports::CallbackParams;

use super::dto::CallbackQuery;

/// Shared state for the auth routes.
#[derive(Clone)]
pub struct AuthAppState {
    pub resolver: Arc<RedirectResolver>,
}

/// GET /auth/callback - finish the login flow with a redirect.
///
/// Always answers with a redirect once a session is established; only a
/// missing code or a failed session exchange produce an error response.
pub async fn auth_callback(
    State(state): State<AuthAppState>,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let Some(code) = query.code else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "MISSING_AUTH_CODE",
                "Auth callback is missing the code parameter",
            )),
        )
            .into_response();
    };

    let mut params = CallbackParams::new(code);
    params.next = query.next;

    match state.resolver.resolve(params).await {
        Ok(path) => Redirect::to(&path).into_response(),
        Err(err) => {
            tracing::warn!(error = %err, "session exchange failed");
            (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("SESSION_EXCHANGE_FAILED", err.to_string())),
            )
                .into_response()
        }
    }
}
