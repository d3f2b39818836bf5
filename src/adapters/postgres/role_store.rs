//! PostgreSQL implementation of the RoleStore port.
//!
//! Rows live in the `user_roles` table (see `migrations/`). Roles are
//! stored as lowercase strings; unknown values in the column are a storage
//! error, not a silent default.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::roles::{RoleAssignment, UserRole};
use crate::ports::RoleStore;

/// Role store backed by a PostgreSQL connection pool.
pub struct PostgresRoleStore {
    pool: PgPool,
}

impl PostgresRoleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a role assignment.
#[derive(Debug, sqlx::FromRow)]
struct RoleRow {
    user_id: Uuid,
    email: Option<String>,
    display_name: Option<String>,
    role: String,
    is_active: bool,
    assigned_by: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RoleRow> for RoleAssignment {
    type Error = DomainError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        let role = UserRole::parse(&row.role).ok_or_else(|| {
            DomainError::storage(format!("Invalid role value in user_roles: {}", row.role))
        })?;

        Ok(RoleAssignment {
            user_id: row.user_id,
            email: row.email,
            display_name: row.display_name,
            role,
            is_active: row.is_active,
            assigned_by: row.assigned_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn map_unique_violation(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        match db_err.constraint() {
            Some("user_roles_pkey") => {
                return DomainError::new(ErrorCode::UserExists, "User already has a role assignment")
            }
            Some("user_roles_email_key") => {
                return DomainError::new(ErrorCode::UserExists, "User with this email already exists")
            }
            _ => {}
        }
    }
    DomainError::storage(format!("Failed to insert role assignment: {}", e))
}

#[async_trait]
impl RoleStore for PostgresRoleStore {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<RoleAssignment>, DomainError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            SELECT user_id, email, display_name, role, is_active, assigned_by, created_at, updated_at
            FROM user_roles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to load role assignment: {}", e)))?;

        row.map(RoleAssignment::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<RoleAssignment>, DomainError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            SELECT user_id, email, display_name, role, is_active, assigned_by, created_at, updated_at
            FROM user_roles
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to load role assignment: {}", e)))?;

        row.map(RoleAssignment::try_from).transpose()
    }

    async fn insert(&self, assignment: &RoleAssignment) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO user_roles (
                user_id, email, display_name, role, is_active, assigned_by, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(assignment.user_id)
        .bind(&assignment.email)
        .bind(&assignment.display_name)
        .bind(assignment.role.as_str())
        .bind(assignment.is_active)
        .bind(assignment.assigned_by)
        .bind(assignment.created_at)
        .bind(assignment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }

    async fn update(&self, assignment: &RoleAssignment) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE user_roles SET
                email = $2,
                display_name = $3,
                role = $4,
                is_active = $5,
                assigned_by = $6,
                updated_at = $7
            WHERE user_id = $1
            "#,
        )
        .bind(assignment.user_id)
        .bind(&assignment.email)
        .bind(&assignment.display_name)
        .bind(assignment.role.as_str())
        .bind(assignment.is_active)
        .bind(assignment.assigned_by)
        .bind(assignment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update role assignment: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::user_not_found());
        }

        Ok(())
    }

    async fn delete(&self, user_id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM user_roles WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete role assignment: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::user_not_found());
        }

        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<RoleAssignment>, DomainError> {
        let rows: Vec<RoleRow> = sqlx::query_as(
            r#"
            SELECT user_id, email, display_name, role, is_active, assigned_by, created_at, updated_at
            FROM user_roles
            WHERE is_active = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list role assignments: {}", e)))?;

        rows.into_iter().map(RoleAssignment::try_from).collect()
    }

    async fn count_active(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_roles WHERE is_active = TRUE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count role assignments: {}", e)))?;

        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_with_known_role_converts() {
        let now = Utc::now();
        let row = RoleRow {
            user_id: Uuid::new_v4(),
            email: Some("a@example.com".to_string()),
            display_name: None,
            role: "admin".to_string(),
            is_active: true,
            assigned_by: None,
            created_at: now,
            updated_at: now,
        };
        let assignment = RoleAssignment::try_from(row).unwrap();
        assert_eq!(assignment.role, UserRole::Admin);
        assert!(assignment.is_acting_admin());
    }

    #[test]
    fn row_with_unknown_role_is_a_storage_error() {
        let now = Utc::now();
        let row = RoleRow {
            user_id: Uuid::new_v4(),
            email: None,
            display_name: None,
            role: "superuser".to_string(),
            is_active: true,
            assigned_by: None,
            created_at: now,
            updated_at: now,
        };
        let err = RoleAssignment::try_from(row).unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
    }
}
