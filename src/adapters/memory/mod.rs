//! In-memory implementations of the role store and audit trail.
//!
//! Used by unit and integration tests, and handy for running the gateway
//! without a database during local frontend work.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::roles::{AuditEntry, RoleAssignment};
use crate::ports::{AuditTrail, RoleStore};

/// Role store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct InMemoryRoleStore {
    rows: Mutex<HashMap<Uuid, RoleAssignment>>,
}

impl InMemoryRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows, active or not.
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RoleStore for InMemoryRoleStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<RoleAssignment>, DomainError> {
        Ok(self.rows.lock().unwrap().get(&user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<RoleAssignment>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|a| a.email.as_deref() == Some(email))
            .cloned())
    }

    async fn insert(&self, assignment: &RoleAssignment) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&assignment.user_id) {
            return Err(DomainError::new(
                ErrorCode::UserExists,
                "User already has a role assignment",
            ));
        }
        if let Some(email) = assignment.email.as_deref() {
            if rows.values().any(|a| a.email.as_deref() == Some(email)) {
                return Err(DomainError::new(
                    ErrorCode::UserExists,
                    "User with this email already exists",
                ));
            }
        }
        rows.insert(assignment.user_id, assignment.clone());
        Ok(())
    }

    async fn update(&self, assignment: &RoleAssignment) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if !rows.contains_key(&assignment.user_id) {
            return Err(DomainError::user_not_found());
        }
        rows.insert(assignment.user_id, assignment.clone());
        Ok(())
    }

    async fn delete(&self, user_id: Uuid) -> Result<(), DomainError> {
        self.rows
            .lock()
            .unwrap()
            .remove(&user_id)
            .map(|_| ())
            .ok_or_else(DomainError::user_not_found)
    }

    async fn list_active(&self) -> Result<Vec<RoleAssignment>, DomainError> {
        let mut active: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.is_active)
            .cloned()
            .collect();
        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }

    async fn count_active(&self) -> Result<u64, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.is_active)
            .count() as u64)
    }
}

/// Audit trail backed by a mutex-guarded vector.
#[derive(Debug, Default)]
pub struct InMemoryAuditTrail {
    entries: Mutex<Vec<AuditEntry>>,
}

impl InMemoryAuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many recorded entries carry the given action. Test helper.
    pub fn entries_for(&self, action: &str) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.action == action)
            .count()
    }
}

#[async_trait]
impl AuditTrail for InMemoryAuditTrail {
    async fn record(&self, entry: AuditEntry) -> Result<(), DomainError> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }

    async fn recent(&self, limit: u32) -> Result<Vec<AuditEntry>, DomainError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.iter().rev().take(limit as usize).cloned().collect())
    }
}
