//! Role assignments and the role-check view.
//!
//! Credentials never live here: authentication belongs to the identity
//! provider, this registry only answers authorization questions. A user
//! absent from the registry is an ordinary user, not an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access level recorded for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Stable string form used in storage and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    /// Parses the storage/API string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(UserRole::User),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the role registry.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleAssignment {
    /// Identity provider subject. The registry only accepts UUID subjects.
    pub user_id: Uuid,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: UserRole,
    /// Deactivated assignments keep their row but grant nothing.
    pub is_active: bool,
    /// The admin who granted the current role, if any.
    pub assigned_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoleAssignment {
    /// Creates a fresh assignment with the given role.
    pub fn new(
        user_id: Uuid,
        email: Option<String>,
        display_name: Option<String>,
        role: UserRole,
        assigned_by: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            email,
            display_name,
            role,
            is_active: true,
            assigned_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// True only for an active admin. Deactivation strips privileges
    /// without losing the assignment history.
    pub fn is_acting_admin(&self) -> bool {
        self.role == UserRole::Admin && self.is_active
    }

    /// Raises the assignment to admin, recording who did it.
    pub fn promote(&mut self, by: Uuid, display_name: Option<String>) {
        self.role = UserRole::Admin;
        self.assigned_by = Some(by);
        if display_name.is_some() {
            self.display_name = display_name;
        }
        self.updated_at = Utc::now();
    }
}

/// Answer to "who is this user to the platform" - the payload behind
/// `GET /api/admin/check-user-role`, including the path the frontend
/// should send the user to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleCheck {
    pub role: UserRole,
    pub is_admin: bool,
    pub redirect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl RoleCheck {
    /// The check for an unknown, invalid, or ordinary user.
    pub fn regular(default_next: &str, display_name: Option<String>) -> Self {
        Self {
            role: UserRole::User,
            is_admin: false,
            redirect: default_next.to_string(),
            display_name,
            email: None,
        }
    }

    /// Builds the check from a registry row (or its absence).
    ///
    /// Only an active admin earns the admin redirect; everything else -
    /// missing row, plain user, deactivated admin - is a regular user.
    pub fn for_assignment(
        assignment: Option<&RoleAssignment>,
        admin_home: &str,
        default_next: &str,
    ) -> Self {
        match assignment {
            Some(a) if a.is_acting_admin() => Self {
                role: UserRole::Admin,
                is_admin: true,
                redirect: admin_home.to_string(),
                display_name: a.display_name.clone(),
                email: a.email.clone(),
            },
            Some(a) => Self::regular(default_next, a.display_name.clone()),
            None => Self::regular(default_next, None),
        }
    }
}
