//! System endpoints - service info and health.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::ports::RoleStore;

/// Shared state for the system routes.
#[derive(Clone)]
pub struct SystemAppState {
    pub store: Arc<dyn RoleStore>,
}

/// GET / - service identification.
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "service": "chainsight-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "features": [
            "Auth callback redirect resolution",
            "Role directory",
            "Admin audit trail",
        ],
    }))
}

/// GET /health - liveness plus a registry connectivity probe.
pub async fn health(State(state): State<SystemAppState>) -> impl IntoResponse {
    match state.store.count_active().await {
        Ok(active_users) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
                "database": {
                    "status": "connected",
                    "active_users": active_users,
                },
            })),
        ),
        Err(err) => {
            tracing::error!(error = %err, "health check failed to reach the role registry");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "version": env!("CARGO_PKG_VERSION"),
                    "database": { "status": "unreachable" },
                })),
            )
        }
    }
}

/// Create the system router, mounted at the root.
pub fn system_router() -> Router<SystemAppState> {
    Router::new().route("/", get(root)).route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryRoleStore;

    #[test]
    fn system_router_builds_with_state() {
        let router = system_router();
        let _: Router<()> = router.with_state(SystemAppState {
            store: Arc::new(InMemoryRoleStore::new()),
        });
    }
}
