//! Role directory use cases.
//!
//! The backend half of the role story: answering `check-user-role` for the
//! auth callback, and the admin-guarded management operations (promote,
//! create, delete, list, audit). Every admin action leaves an audit entry.
//!
//! Security rules carried over from the platform:
//! - Role changes require an existing active admin
//! - An admin cannot delete themselves, nor another admin
//! - A deactivated admin account grants nothing

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::redirect::RedirectPaths;
use crate::domain::roles::{actions, AuditEntry, RoleAssignment, RoleCheck, UserRole};
use crate::ports::{AuditTrail, RoleStore};

/// A verified admin caller, attached to guarded operations.
#[derive(Debug, Clone)]
pub struct AdminContext {
    pub user_id: Uuid,
    pub email: String,
}

/// Application service over the role registry.
pub struct RoleDirectory {
    store: Arc<dyn RoleStore>,
    audit: Arc<dyn AuditTrail>,
    paths: RedirectPaths,
}

impl RoleDirectory {
    pub fn new(store: Arc<dyn RoleStore>, audit: Arc<dyn AuditTrail>, paths: RedirectPaths) -> Self {
        Self { store, audit, paths }
    }

    /// Public role check used by the auth callback flow.
    ///
    /// Never errors on bad input: an unparseable user id is simply a
    /// regular user, the same as an unknown one.
    pub async fn check_user_role(&self, raw_user_id: &str) -> Result<RoleCheck, DomainError> {
        let Ok(user_id) = Uuid::parse_str(raw_user_id) else {
            return Ok(RoleCheck::regular(&self.paths.default_next, None));
        };

        let assignment = self.store.find_by_user(user_id).await?;
        Ok(RoleCheck::for_assignment(
            assignment.as_ref(),
            &self.paths.admin_home,
            &self.paths.default_next,
        ))
    }

    /// Verifies that the caller behind the admin headers is an active admin.
    ///
    /// Errors map onto the HTTP statuses the admin UI expects: missing
    /// header → 401, malformed id → 400, non-admin or deactivated → 403.
    pub async fn require_admin(
        &self,
        raw_user_id: Option<&str>,
        email_header: Option<&str>,
    ) -> Result<AdminContext, DomainError> {
        let raw = raw_user_id.ok_or_else(|| {
            DomainError::new(
                ErrorCode::AuthenticationRequired,
                "Authentication required. Missing X-Admin-User-ID header.",
            )
        })?;

        let user_id = Uuid::parse_str(raw)
            .map_err(|_| DomainError::new(ErrorCode::InvalidUserId, "Invalid user ID format"))?;

        let assignment = self.store.find_by_user(user_id).await?.ok_or_else(|| {
            DomainError::new(
                ErrorCode::AdminRequired,
                "Access denied. User not found in role system.",
            )
        })?;

        if assignment.role != UserRole::Admin {
            return Err(DomainError::new(
                ErrorCode::AdminRequired,
                "Access denied. Admin privileges required.",
            ));
        }

        if !assignment.is_active {
            return Err(DomainError::new(
                ErrorCode::AccountDeactivated,
                "Access denied. Admin account is deactivated.",
            ));
        }

        let email = email_header
            .map(String::from)
            .or(assignment.email)
            .unwrap_or_default();

        Ok(AdminContext { user_id, email })
    }

    /// Promotes an existing user to admin, or registers a new admin row.
    pub async fn promote_to_admin(
        &self,
        admin: &AdminContext,
        raw_user_id: &str,
        email: &str,
        display_name: Option<String>,
    ) -> Result<RoleAssignment, DomainError> {
        let user_id = Uuid::parse_str(raw_user_id)
            .map_err(|_| DomainError::new(ErrorCode::InvalidUserId, "Invalid user ID format"))?;

        let promoted = match self.store.find_by_user(user_id).await? {
            Some(mut existing) => {
                if existing.role == UserRole::Admin {
                    return Err(DomainError::new(
                        ErrorCode::AlreadyAdmin,
                        "User is already an admin",
                    ));
                }
                existing.promote(admin.user_id, display_name);
                self.store.update(&existing).await?;
                existing
            }
            None => {
                let assignment = RoleAssignment::new(
                    user_id,
                    Some(email.to_string()),
                    display_name,
                    UserRole::Admin,
                    Some(admin.user_id),
                );
                self.store.insert(&assignment).await?;
                assignment
            }
        };

        self.audit
            .record(
                AuditEntry::new(admin.user_id, actions::PROMOTE_TO_ADMIN)
                    .with_target("user", user_id)
                    .with_details(format!("Promoted {} to admin role", email)),
            )
            .await?;

        Ok(promoted)
    }

    /// Registers a new user row in the registry.
    ///
    /// The identity provider account is created separately through normal
    /// sign-up; this only seeds the authorization side.
    pub async fn create_user(
        &self,
        admin: &AdminContext,
        email: &str,
        display_name: Option<String>,
        role: UserRole,
    ) -> Result<RoleAssignment, DomainError> {
        if self.store.find_by_email(email).await?.is_some() {
            return Err(DomainError::new(
                ErrorCode::UserExists,
                "User with this email already exists",
            ));
        }

        let assignment = RoleAssignment::new(
            Uuid::new_v4(),
            Some(email.to_string()),
            display_name,
            role,
            Some(admin.user_id),
        );
        self.store.insert(&assignment).await?;

        self.audit
            .record(
                AuditEntry::new(admin.user_id, actions::CREATE_USER)
                    .with_target("user", assignment.user_id)
                    .with_details(format!("Created user {} with role {}", email, role)),
            )
            .await?;

        Ok(assignment)
    }

    /// Deletes a user's registry row.
    ///
    /// Admins cannot delete themselves, and another admin must be demoted
    /// before deletion.
    pub async fn delete_user(&self, admin: &AdminContext, raw_user_id: &str) -> Result<(), DomainError> {
        let user_id = Uuid::parse_str(raw_user_id)
            .map_err(|_| DomainError::new(ErrorCode::InvalidUserId, "Invalid user ID format"))?;

        if user_id == admin.user_id {
            return Err(DomainError::new(
                ErrorCode::SelfDeletionForbidden,
                "Cannot delete your own admin account",
            ));
        }

        let target = self
            .store
            .find_by_user(user_id)
            .await?
            .ok_or_else(DomainError::user_not_found)?;

        if target.role == UserRole::Admin {
            return Err(DomainError::new(
                ErrorCode::AdminDeletionForbidden,
                "Cannot delete another admin. Demote to user first.",
            ));
        }

        self.store.delete(user_id).await?;

        let email = target.email.as_deref().unwrap_or("unknown");
        self.audit
            .record(
                AuditEntry::new(admin.user_id, actions::DELETE_USER)
                    .with_target("user", user_id)
                    .with_details(format!("Deleted user {}", email)),
            )
            .await?;

        Ok(())
    }

    /// All active users, newest first.
    pub async fn list_users(&self, admin: &AdminContext) -> Result<Vec<RoleAssignment>, DomainError> {
        let users = self.store.list_active().await?;

        self.audit
            .record(
                AuditEntry::new(admin.user_id, actions::LIST_USERS)
                    .with_details(format!("Listed {} users", users.len())),
            )
            .await?;

        Ok(users)
    }

    /// The most recent audit entries.
    pub async fn audit_log(&self, admin: &AdminContext, limit: u32) -> Result<Vec<AuditEntry>, DomainError> {
        self.audit
            .record(AuditEntry::new(admin.user_id, actions::VIEW_AUDIT_LOG))
            .await?;
        self.audit.recent(limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::adapters::memory::{InMemoryAuditTrail, InMemoryRoleStore};

    fn directory() -> (RoleDirectory, Arc<InMemoryRoleStore>, Arc<InMemoryAuditTrail>) {
        let store = Arc::new(InMemoryRoleStore::new());
        let audit = Arc::new(InMemoryAuditTrail::new());
        let dir = RoleDirectory::new(store.clone(), audit.clone(), RedirectPaths::default());
        (dir, store, audit)
    }

    async fn seed_admin(store: &InMemoryRoleStore) -> Uuid {
        let id = Uuid::new_v4();
        store
            .insert(&RoleAssignment::new(
                id,
                Some("root@example.com".to_string()),
                Some("Root".to_string()),
                UserRole::Admin,
                None,
            ))
            .await
            .unwrap();
        id
    }

    /// Seeds a second, distinct admin. Uses a different email so it can
    /// coexist with the one from `seed_admin` under the store's email
    /// uniqueness rule.
    async fn seed_other_admin(store: &InMemoryRoleStore) -> Uuid {
        let id = Uuid::new_v4();
        store
            .insert(&RoleAssignment::new(
                id,
                Some("other-admin@example.com".to_string()),
                Some("Other".to_string()),
                UserRole::Admin,
                None,
            ))
            .await
            .unwrap();
        id
    }

    async fn admin_context(dir: &RoleDirectory, id: Uuid) -> AdminContext {
        dir.require_admin(Some(&id.to_string()), Some("root@example.com"))
            .await
            .unwrap()
    }

    // check_user_role

    #[tokio::test]
    async fn invalid_uuid_is_a_regular_user() {
        let (dir, _, _) = directory();
        let check = dir.check_user_role("not-a-uuid").await.unwrap();
        assert!(!check.is_admin);
        assert_eq!(check.redirect, "/dashboard");
    }

    #[tokio::test]
    async fn unknown_user_is_a_regular_user() {
        let (dir, _, _) = directory();
        let check = dir.check_user_role(&Uuid::new_v4().to_string()).await.unwrap();
        assert!(!check.is_admin);
    }

    #[tokio::test]
    async fn active_admin_checks_as_admin() {
        let (dir, store, _) = directory();
        let id = seed_admin(&store).await;
        let check = dir.check_user_role(&id.to_string()).await.unwrap();
        assert!(check.is_admin);
        assert_eq!(check.redirect, "/admin");
        assert_eq!(check.email.as_deref(), Some("root@example.com"));
    }

    #[tokio::test]
    async fn deactivated_admin_checks_as_regular() {
        let (dir, store, _) = directory();
        let id = seed_admin(&store).await;
        let mut row = store.find_by_user(id).await.unwrap().unwrap();
        row.is_active = false;
        store.update(&row).await.unwrap();

        let check = dir.check_user_role(&id.to_string()).await.unwrap();
        assert!(!check.is_admin);
        assert_eq!(check.redirect, "/dashboard");
    }

    // require_admin

    #[tokio::test]
    async fn missing_header_requires_authentication() {
        let (dir, _, _) = directory();
        let err = dir.require_admin(None, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthenticationRequired);
    }

    #[tokio::test]
    async fn malformed_id_is_invalid() {
        let (dir, _, _) = directory();
        let err = dir.require_admin(Some("nope"), None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidUserId);
    }

    #[tokio::test]
    async fn plain_user_is_rejected() {
        let (dir, store, _) = directory();
        let id = Uuid::new_v4();
        store
            .insert(&RoleAssignment::new(id, None, None, UserRole::User, None))
            .await
            .unwrap();
        let err = dir
            .require_admin(Some(&id.to_string()), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AdminRequired);
    }

    #[tokio::test]
    async fn deactivated_admin_is_rejected() {
        let (dir, store, _) = directory();
        let id = seed_admin(&store).await;
        let mut row = store.find_by_user(id).await.unwrap().unwrap();
        row.is_active = false;
        store.update(&row).await.unwrap();

        let err = dir
            .require_admin(Some(&id.to_string()), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AccountDeactivated);
    }

    // promote_to_admin

    #[tokio::test]
    async fn promoting_existing_user_updates_row_and_audits() {
        let (dir, store, audit) = directory();
        let admin_id = seed_admin(&store).await;
        let admin = admin_context(&dir, admin_id).await;

        let target = Uuid::new_v4();
        store
            .insert(&RoleAssignment::new(
                target,
                Some("u@example.com".to_string()),
                None,
                UserRole::User,
                None,
            ))
            .await
            .unwrap();

        let promoted = dir
            .promote_to_admin(&admin, &target.to_string(), "u@example.com", None)
            .await
            .unwrap();
        assert!(promoted.is_acting_admin());
        assert_eq!(promoted.assigned_by, Some(admin_id));
        assert_eq!(audit.entries_for(actions::PROMOTE_TO_ADMIN), 1);
    }

    #[tokio::test]
    async fn promoting_unknown_user_creates_admin_row() {
        let (dir, store, _) = directory();
        let admin_id = seed_admin(&store).await;
        let admin = admin_context(&dir, admin_id).await;

        let target = Uuid::new_v4();
        dir.promote_to_admin(&admin, &target.to_string(), "new@example.com", Some("New".into()))
            .await
            .unwrap();
        let row = store.find_by_user(target).await.unwrap().unwrap();
        assert!(row.is_acting_admin());
    }

    #[tokio::test]
    async fn promoting_an_admin_fails() {
        let (dir, store, _) = directory();
        let admin_id = seed_admin(&store).await;
        let admin = admin_context(&dir, admin_id).await;

        let other = seed_other_admin(&store).await;
        let err = dir
            .promote_to_admin(&admin, &other.to_string(), "root@example.com", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyAdmin);
    }

    // create_user / delete_user

    #[tokio::test]
    async fn creating_user_rejects_duplicate_email() {
        let (dir, store, audit) = directory();
        let admin_id = seed_admin(&store).await;
        let admin = admin_context(&dir, admin_id).await;

        dir.create_user(&admin, "a@example.com", None, UserRole::User)
            .await
            .unwrap();
        let err = dir
            .create_user(&admin, "a@example.com", None, UserRole::User)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserExists);
        assert_eq!(audit.entries_for(actions::CREATE_USER), 1);
    }

    #[tokio::test]
    async fn self_deletion_is_forbidden() {
        let (dir, store, _) = directory();
        let admin_id = seed_admin(&store).await;
        let admin = admin_context(&dir, admin_id).await;

        let err = dir
            .delete_user(&admin, &admin_id.to_string())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SelfDeletionForbidden);
    }

    #[tokio::test]
    async fn deleting_another_admin_is_forbidden() {
        let (dir, store, _) = directory();
        let admin_id = seed_admin(&store).await;
        let admin = admin_context(&dir, admin_id).await;
        let other = seed_other_admin(&store).await;

        let err = dir.delete_user(&admin, &other.to_string()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AdminDeletionForbidden);
    }

    #[tokio::test]
    async fn deleting_regular_user_removes_row_and_audits() {
        let (dir, store, audit) = directory();
        let admin_id = seed_admin(&store).await;
        let admin = admin_context(&dir, admin_id).await;

        let target = dir
            .create_user(&admin, "bye@example.com", None, UserRole::User)
            .await
            .unwrap();
        dir.delete_user(&admin, &target.user_id.to_string())
            .await
            .unwrap();
        assert!(store.find_by_user(target.user_id).await.unwrap().is_none());
        assert_eq!(audit.entries_for(actions::DELETE_USER), 1);
    }

    #[tokio::test]
    async fn deleting_unknown_user_is_not_found() {
        let (dir, store, _) = directory();
        let admin_id = seed_admin(&store).await;
        let admin = admin_context(&dir, admin_id).await;

        let err = dir
            .delete_user(&admin, &Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    // listings

    #[tokio::test]
    async fn listing_users_audits_once() {
        let (dir, store, audit) = directory();
        let admin_id = seed_admin(&store).await;
        let admin = admin_context(&dir, admin_id).await;

        let users = dir.list_users(&admin).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(audit.entries_for(actions::LIST_USERS), 1);
    }

    #[tokio::test]
    async fn audit_log_returns_recent_entries() {
        let (dir, store, _) = directory();
        let admin_id = seed_admin(&store).await;
        let admin = admin_context(&dir, admin_id).await;

        dir.list_users(&admin).await.unwrap();
        let log = dir.audit_log(&admin, 10).await.unwrap();
        assert!(!log.is_empty());
    }
}
