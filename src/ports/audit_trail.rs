//! Audit trail port - append-only record of admin actions.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::roles::AuditEntry;

/// Append-only store of admin actions.
#[async_trait]
pub trait AuditTrail: Send + Sync {
    /// Record one action. Entries are never updated or deleted.
    async fn record(&self, entry: AuditEntry) -> Result<(), DomainError>;

    /// The most recent entries, newest first.
    async fn recent(&self, limit: u32) -> Result<Vec<AuditEntry>, DomainError>;
}
