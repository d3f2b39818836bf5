//! PostgreSQL implementation of the AuditTrail port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::DomainError;
use crate::domain::roles::AuditEntry;
use crate::ports::AuditTrail;

/// Audit trail backed by the `admin_audit_log` table.
pub struct PostgresAuditTrail {
    pool: PgPool,
}

impl PostgresAuditTrail {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AuditRow {
    id: Uuid,
    admin_user_id: Uuid,
    action: String,
    target_type: Option<String>,
    target_id: Option<Uuid>,
    details: Option<String>,
    ip_address: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<AuditRow> for AuditEntry {
    fn from(row: AuditRow) -> Self {
        AuditEntry {
            id: row.id,
            admin_user_id: row.admin_user_id,
            action: row.action,
            target_type: row.target_type,
            target_id: row.target_id,
            details: row.details,
            ip_address: row.ip_address,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl AuditTrail for PostgresAuditTrail {
    async fn record(&self, entry: AuditEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO admin_audit_log (
                id, admin_user_id, action, target_type, target_id, details, ip_address, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id)
        .bind(entry.admin_user_id)
        .bind(&entry.action)
        .bind(&entry.target_type)
        .bind(entry.target_id)
        .bind(&entry.details)
        .bind(&entry.ip_address)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to record audit entry: {}", e)))?;

        Ok(())
    }

    async fn recent(&self, limit: u32) -> Result<Vec<AuditEntry>, DomainError> {
        let rows: Vec<AuditRow> = sqlx::query_as(
            r#"
            SELECT id, admin_user_id, action, target_type, target_id, details, ip_address, created_at
            FROM admin_audit_log
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to load audit entries: {}", e)))?;

        Ok(rows.into_iter().map(AuditEntry::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_row_converts_field_for_field() {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let admin = Uuid::new_v4();
        let target = Uuid::new_v4();
        let row = AuditRow {
            id,
            admin_user_id: admin,
            action: "DELETE_USER".to_string(),
            target_type: Some("user".to_string()),
            target_id: Some(target),
            details: Some("Deleted user x".to_string()),
            ip_address: None,
            created_at: now,
        };
        let entry = AuditEntry::from(row);
        assert_eq!(entry.id, id);
        assert_eq!(entry.admin_user_id, admin);
        assert_eq!(entry.target_id, Some(target));
        assert_eq!(entry.created_at, now);
    }
}
