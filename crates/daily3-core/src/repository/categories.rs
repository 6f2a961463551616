use crate::error::CoreError;
use crate::models::{Category, RemovalPolicy, UNCATEGORIZED};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

/// Fixed set seeded for a fresh owner.
pub const DEFAULT_CATEGORIES: [&str; 5] = [
    "Income Generation",
    "Strategy",
    "Admin",
    "Relationships",
    "Other",
];

#[async_trait]
impl super::CategoryRepository for SqliteRepository {
    async fn add_category(&self, owner: &str, name: &str) -> Result<(), CoreError> {
        if owner.is_empty() {
            return Err(CoreError::AuthRequired);
        }
        let normalized = name.trim();
        if normalized.is_empty() {
            return Err(CoreError::InvalidInput("Category name cannot be empty".to_string()));
        }

        // Duplicate check is case-insensitive; storage keeps the given case.
        let existing: Option<(i64,)> = sqlx::query_as(
            "SELECT 1 FROM categories WHERE owner = $1 AND lower(name) = lower($2)",
        )
        .bind(owner)
        .bind(normalized)
        .fetch_optional(self.pool())
        .await?;

        if existing.is_some() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO categories (id, owner, name, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::now_v7())
        .bind(owner)
        .bind(normalized)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn find_categories(&self, owner: &str) -> Result<Vec<Category>, CoreError> {
        let categories = sqlx::query_as(
            "SELECT * FROM categories WHERE owner = $1 ORDER BY name COLLATE NOCASE",
        )
        .bind(owner)
        .fetch_all(self.pool())
        .await?;
        Ok(categories)
    }

    async fn remove_category(
        &self,
        owner: &str,
        name: &str,
        policy: RemovalPolicy,
    ) -> Result<(), CoreError> {
        let mut tx = self.pool().begin().await?;

        match policy {
            RemovalPolicy::Migrate => {
                sqlx::query("UPDATE tasks SET category = $1 WHERE owner = $2 AND category = $3")
                    .bind(UNCATEGORIZED)
                    .bind(owner)
                    .bind(name)
                    .execute(&mut *tx)
                    .await?;
            }
            RemovalPolicy::Delete => {
                sqlx::query("DELETE FROM tasks WHERE owner = $1 AND category = $2")
                    .bind(owner)
                    .bind(name)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        let removed = sqlx::query("DELETE FROM categories WHERE owner = $1 AND name = $2")
            .bind(owner)
            .bind(name)
            .execute(&mut *tx)
            .await?;

        // The task mutation still stands when no category row matched; the
        // category list and task references can drift apart.
        if removed.rows_affected() == 0 {
            tracing::warn!(owner, category = name, "no category record found during removal");
        }

        tx.commit().await?;
        self.notify(owner).await;
        Ok(())
    }

    async fn seed_default_categories(&self, owner: &str) -> Result<bool, CoreError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories WHERE owner = $1")
            .bind(owner)
            .fetch_one(self.pool())
            .await?;

        if count.0 > 0 {
            return Ok(false);
        }

        let mut tx = self.pool().begin().await?;
        for name in DEFAULT_CATEGORIES {
            sqlx::query(
                "INSERT INTO categories (id, owner, name, created_at) VALUES ($1, $2, $3, $4)",
            )
            .bind(Uuid::now_v7())
            .bind(owner)
            .bind(name)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        tracing::debug!(owner, "seeded first-time categories");
        Ok(true)
    }
}
