//! Axum router for the role directory.

use axum::routing::{delete, get, post};
use axum::Router;

use super::handlers::{
    audit_log, check_admin_role, check_user_role, create_user, delete_user, list_users,
    promote_to_admin, AdminAppState,
};

/// Create the role directory router, mounted at `/api/admin`.
///
/// # Routes
///
/// ## Public (no admin auth)
/// - `GET /check-user-role?user_id=` - role check for the auth callback
/// - `GET /check-role` - header-based admin check for the frontend shell
///
/// ## Admin only (X-Admin-User-ID verified against the registry)
/// - `POST /promote-to-admin` - raise a user to admin
/// - `GET /users` - list active users
/// - `POST /users` - register a new user
/// - `DELETE /users/:user_id` - remove a user (no self-delete, no admins)
/// - `GET /audit-log` - recent admin actions
pub fn admin_router() -> Router<AdminAppState> {
    Router::new()
        .route("/check-user-role", get(check_user_role))
        .route("/check-role", get(check_admin_role))
        .route("/promote-to-admin", post(promote_to_admin))
        .route("/users", get(list_users).post(create_user))
        .route("/users/:user_id", delete(delete_user))
        .route("/audit-log", get(audit_log))
}
