//! Local session identities.
//!
//! The owner field on every record is an opaque identifier; these rows
//! track which identifier the current installation writes under. Replacing
//! the active identity (sign-out, linking a durable account) strands the
//! old identity's records until they are reclaimed through the
//! reconciliation path.

use crate::error::CoreError;
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[async_trait]
impl super::IdentityRepository for SqliteRepository {
    async fn current_identity(&self) -> Result<Option<String>, CoreError> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT id FROM identities WHERE active = TRUE ORDER BY created_at DESC LIMIT 1",
        )
        .fetch_optional(self.pool())
        .await?;
        Ok(row.map(|(id,)| id))
    }

    async fn establish_identity(&self) -> Result<String, CoreError> {
        if let Some(id) = self.current_identity().await? {
            return Ok(id);
        }

        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO identities (id, provider, active, created_at) VALUES ($1, 'anonymous', TRUE, $2)",
        )
        .bind(&id)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;

        tracing::info!(identity = %id, "established anonymous identity");
        Ok(id)
    }

    async fn link_identity(&self, durable_id: &str) -> Result<String, CoreError> {
        let durable_id = durable_id.trim();
        if durable_id.is_empty() {
            return Err(CoreError::InvalidInput("Identity id cannot be empty".to_string()));
        }

        let mut tx = self.pool().begin().await?;
        sqlx::query("UPDATE identities SET active = FALSE WHERE active = TRUE")
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            r#"INSERT INTO identities (id, provider, active, created_at)
            VALUES ($1, 'linked', TRUE, $2)
            ON CONFLICT (id) DO UPDATE SET active = TRUE
            "#,
        )
        .bind(durable_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        tracing::info!(identity = durable_id, "linked durable identity");
        Ok(durable_id.to_string())
    }

    async fn sign_out(&self) -> Result<(), CoreError> {
        sqlx::query("UPDATE identities SET active = FALSE WHERE active = TRUE")
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
