//! Audit trail entries for admin actions.
//!
//! Every mutating directory operation (and the read-only listings an admin
//! performs) leaves exactly one entry.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Well-known action labels, matching what the admin UI expects to display.
pub mod actions {
    pub const PROMOTE_TO_ADMIN: &str = "PROMOTE_TO_ADMIN";
    pub const CREATE_USER: &str = "CREATE_USER";
    pub const DELETE_USER: &str = "DELETE_USER";
    pub const LIST_USERS: &str = "LIST_USERS";
    pub const VIEW_AUDIT_LOG: &str = "VIEW_AUDIT_LOG";
}

/// One recorded admin action.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub id: Uuid,
    pub admin_user_id: Uuid,
    pub action: String,
    pub target_type: Option<String>,
    pub target_id: Option<Uuid>,
    pub details: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Creates an entry for an action with no specific target.
    pub fn new(admin_user_id: Uuid, action: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            admin_user_id,
            action: action.into(),
            target_type: None,
            target_id: None,
            details: None,
            ip_address: None,
            created_at: Utc::now(),
        }
    }

    /// Attaches the entity the action touched.
    pub fn with_target(mut self, target_type: impl Into<String>, target_id: Uuid) -> Self {
        self.target_type = Some(target_type.into());
        self.target_id = Some(target_id);
        self
    }

    /// Attaches free-form detail text.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_starts_without_target_or_details() {
        let admin = Uuid::new_v4();
        let entry = AuditEntry::new(admin, actions::LIST_USERS);
        assert_eq!(entry.admin_user_id, admin);
        assert_eq!(entry.action, "LIST_USERS");
        assert!(entry.target_type.is_none());
        assert!(entry.details.is_none());
    }

    #[test]
    fn builder_attaches_target_and_details() {
        let target = Uuid::new_v4();
        let entry = AuditEntry::new(Uuid::new_v4(), actions::DELETE_USER)
            .with_target("user", target)
            .with_details("Deleted user a@example.com");
        assert_eq!(entry.target_type.as_deref(), Some("user"));
        assert_eq!(entry.target_id, Some(target));
        assert!(entry.details.unwrap().contains("a@example.com"));
    }
}
