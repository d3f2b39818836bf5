//! Request/response DTOs for the role directory endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::roles::{AuditEntry, RoleAssignment, RoleCheck};

/// Query for the public role check.
#[derive(Debug, Deserialize)]
pub struct CheckRoleQuery {
    pub user_id: String,
}

/// Answer to the public role check.
#[derive(Debug, Serialize)]
pub struct RoleCheckResponse {
    pub role: String,
    pub is_admin: bool,
    pub redirect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<RoleCheck> for RoleCheckResponse {
    fn from(check: RoleCheck) -> Self {
        Self {
            role: check.role.to_string(),
            is_admin: check.is_admin,
            redirect: check.redirect,
            display_name: check.display_name,
            email: check.email,
        }
    }
}

/// Answer to the header-based admin check used by the frontend shell.
#[derive(Debug, Serialize)]
pub struct AdminCheckResponse {
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AdminCheckResponse {
    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            is_admin: false,
            role: None,
            email: None,
            reason: Some(reason.into()),
        }
    }
}

/// Request to promote a user to admin.
#[derive(Debug, Deserialize)]
pub struct PromoteRequest {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Request to register a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub display_name: Option<String>,
    /// "user" (default) or "admin".
    pub role: Option<String>,
}

/// One user row in listings and creation responses.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<RoleAssignment> for UserResponse {
    fn from(a: RoleAssignment) -> Self {
        Self {
            id: a.user_id.to_string(),
            email: a.email,
            display_name: a.display_name,
            role: a.role.to_string(),
            is_active: a.is_active,
            created_at: a.created_at,
        }
    }
}

/// Mutation acknowledgement.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

/// Query for the audit log.
#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub limit: Option<u32>,
}

/// One audit trail entry.
#[derive(Debug, Serialize)]
pub struct AuditEntryResponse {
    pub id: String,
    pub admin_user_id: String,
    pub action: String,
    pub target_type: Option<String>,
    pub target_id: Option<String>,
    pub details: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AuditEntry> for AuditEntryResponse {
    fn from(e: AuditEntry) -> Self {
        Self {
            id: e.id.to_string(),
            admin_user_id: e.admin_user_id.to_string(),
            action: e.action,
            target_type: e.target_type,
            target_id: e.target_id.map(|id| id.to_string()),
            details: e.details,
            ip_address: e.ip_address,
            created_at: e.created_at,
        }
    }
}

/// Audit log envelope.
#[derive(Debug, Serialize)]
pub struct AuditLogResponse {
    pub logs: Vec<AuditEntryResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::roles::UserRole;
    use uuid::Uuid;

    #[test]
    fn role_check_response_carries_redirect() {
        let check = RoleCheck::regular("/dashboard", None);
        let response = RoleCheckResponse::from(check);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"redirect\":\"/dashboard\""));
        assert!(json.contains("\"role\":\"user\""));
    }

    #[test]
    fn user_response_from_assignment() {
        let a = RoleAssignment::new(
            Uuid::new_v4(),
            Some("a@example.com".to_string()),
            None,
            UserRole::Admin,
            None,
        );
        let response = UserResponse::from(a.clone());
        assert_eq!(response.id, a.user_id.to_string());
        assert_eq!(response.role, "admin");
        assert!(response.is_active);
    }

    #[test]
    fn denied_admin_check_has_reason() {
        let json = serde_json::to_string(&AdminCheckResponse::denied("No user ID provided")).unwrap();
        assert!(json.contains("\"is_admin\":false"));
        assert!(json.contains("No user ID provided"));
    }
}
