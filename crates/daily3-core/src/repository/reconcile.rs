//! Orphan reconciliation: recovery for records stranded under a replaced
//! identity.
//!
//! There is no provenance check beyond the caller's confirmation; the scan
//! simply counts every task whose owner differs from the current identity,
//! and the claim rewrites them wholesale. A store that rejects unscoped
//! reads fails with `PermissionDenied`, which locked-down deployments are
//! expected to hit.

use crate::error::CoreError;
use crate::repository::SqliteRepository;
use async_trait::async_trait;

#[async_trait]
impl super::ReconciliationRepository for SqliteRepository {
    async fn scan_orphans(&self, current_owner: &str) -> Result<u64, CoreError> {
        if current_owner.is_empty() {
            return Err(CoreError::AuthRequired);
        }

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE owner != $1")
            .bind(current_owner)
            .fetch_one(self.pool())
            .await
            .map_err(|e| CoreError::PermissionDenied(e.to_string()))?;

        Ok(count.0 as u64)
    }

    async fn claim_orphans(&self, current_owner: &str) -> Result<u64, CoreError> {
        if current_owner.is_empty() {
            return Err(CoreError::AuthRequired);
        }

        let mut tx = self.pool().begin().await?;
        let tasks = sqlx::query("UPDATE tasks SET owner = $1 WHERE owner != $1")
            .bind(current_owner)
            .execute(&mut *tx)
            .await
            .map_err(|e| CoreError::PermissionDenied(e.to_string()))?;
        // Notes follow their task's owner so the disruptor digest keeps
        // seeing them after a claim.
        sqlx::query("UPDATE notes SET owner = $1 WHERE owner != $1")
            .bind(current_owner)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        let claimed = tasks.rows_affected();
        if claimed > 0 {
            tracing::info!(owner = current_owner, claimed, "reassigned orphaned tasks");
            self.notify(current_owner).await;
        }
        Ok(claimed)
    }
}
