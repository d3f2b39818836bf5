//! Role store port - persistence for the role registry.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::foundation::DomainError;
use crate::domain::roles::RoleAssignment;

/// Persistence contract for role assignments.
///
/// # Contract
///
/// Implementations must:
/// - Treat `user_id` as the unique key; `insert` of an existing user or a
///   duplicate email fails with `ErrorCode::UserExists`
/// - Return `Ok(None)` for unknown users rather than an error
/// - Keep deactivated rows readable; `list_active` filters them out
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Fetch the assignment for a user, if one exists.
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<RoleAssignment>, DomainError>;

    /// Fetch the assignment carrying the given email, if any.
    async fn find_by_email(&self, email: &str) -> Result<Option<RoleAssignment>, DomainError>;

    /// Insert a brand-new assignment.
    async fn insert(&self, assignment: &RoleAssignment) -> Result<(), DomainError>;

    /// Update an existing assignment in place.
    async fn update(&self, assignment: &RoleAssignment) -> Result<(), DomainError>;

    /// Remove an assignment entirely.
    async fn delete(&self, user_id: Uuid) -> Result<(), DomainError>;

    /// All active assignments, newest first.
    async fn list_active(&self) -> Result<Vec<RoleAssignment>, DomainError>;

    /// Number of active assignments. Doubles as the health-check probe.
    async fn count_active(&self) -> Result<u64, DomainError>;
}
