//! HTTP handlers for the role directory endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::adapters::http::ApiError;
use crate::application::RoleDirectory;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::roles::UserRole;

use super::dto::{
    AdminCheckResponse, AuditEntryResponse, AuditLogResponse, AuditQuery, CheckRoleQuery,
    CreateUserRequest, MutationResponse, PromoteRequest, RoleCheckResponse, UserResponse,
};
use super::guard::AdminGuard;

const DEFAULT_AUDIT_LIMIT: u32 = 100;

/// Shared state for the role directory routes.
#[derive(Clone)]
pub struct AdminAppState {
    pub directory: Arc<RoleDirectory>,
}

// ════════════════════════════════════════════════════════════════════════════
// Public role checks (no admin auth)
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/check-user-role?user_id= - role check for the auth callback.
///
/// Public by design: the callback asks this question before any admin
/// headers exist. Never errors on bad input - unknown and invalid ids are
/// regular users.
pub async fn check_user_role(
    State(state): State<AdminAppState>,
    Query(query): Query<CheckRoleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let check = state.directory.check_user_role(&query.user_id).await?;
    Ok(Json(RoleCheckResponse::from(check)))
}

/// GET /api/admin/check-role - header-based check for the frontend shell.
pub async fn check_admin_role(
    State(state): State<AdminAppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let Some(user_id) = headers
        .get("x-admin-user-id")
        .and_then(|v| v.to_str().ok())
    else {
        return Ok(Json(AdminCheckResponse::denied("No user ID provided")));
    };

    let check = state.directory.check_user_role(user_id).await?;
    Ok(Json(AdminCheckResponse {
        is_admin: check.is_admin,
        role: Some(check.role.to_string()),
        email: check.email,
        reason: None,
    }))
}

// ════════════════════════════════════════════════════════════════════════════
// Guarded management endpoints
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/admin/promote-to-admin - raise a user to admin.
pub async fn promote_to_admin(
    State(state): State<AdminAppState>,
    AdminGuard(admin): AdminGuard,
    Json(request): Json<PromoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let promoted = state
        .directory
        .promote_to_admin(&admin, &request.user_id, &request.email, request.display_name)
        .await?;

    Ok(Json(MutationResponse {
        success: true,
        message: format!("User {} has been promoted to admin", request.email),
        user: Some(UserResponse::from(promoted)),
    }))
}

/// GET /api/admin/users - list active users.
pub async fn list_users(
    State(state): State<AdminAppState>,
    AdminGuard(admin): AdminGuard,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.directory.list_users(&admin).await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(users))
}

/// POST /api/admin/users - register a new user.
///
/// The identity provider account is created through normal sign-up; this
/// only seeds the authorization registry.
pub async fn create_user(
    State(state): State<AdminAppState>,
    AdminGuard(admin): AdminGuard,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let role = match request.role.as_deref() {
        None => UserRole::User,
        Some(raw) => UserRole::parse(raw).ok_or_else(|| {
            DomainError::new(
                ErrorCode::ValidationFailed,
                "Invalid role. Must be 'user' or 'admin'",
            )
        })?,
    };

    let created = state
        .directory
        .create_user(&admin, &request.email, request.display_name, role)
        .await?;

    let response = MutationResponse {
        success: true,
        message: "User created successfully".to_string(),
        user: Some(UserResponse::from(created)),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// DELETE /api/admin/users/:user_id - remove a user's registry row.
pub async fn delete_user(
    State(state): State<AdminAppState>,
    AdminGuard(admin): AdminGuard,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.directory.delete_user(&admin, &user_id).await?;
    Ok(Json(MutationResponse {
        success: true,
        message: "User deleted successfully".to_string(),
        user: None,
    }))
}

/// GET /api/admin/audit-log - recent admin actions.
pub async fn audit_log(
    State(state): State<AdminAppState>,
    AdminGuard(admin): AdminGuard,
    Query(query): Query<AuditQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_AUDIT_LIMIT);
    let entries = state.directory.audit_log(&admin, limit).await?;
    Ok(Json(AuditLogResponse {
        logs: entries.into_iter().map(AuditEntryResponse::from).collect(),
    }))
}
