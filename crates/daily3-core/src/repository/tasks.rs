use crate::error::CoreError;
use crate::models::{NewTaskData, Task, UpdateTaskData, UNCATEGORIZED};
use crate::repository::SqliteRepository;
use crate::scoring::leverage_score;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};
use tokio::sync::watch;
use uuid::Uuid;

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn create_task(&self, owner: &str, data: NewTaskData) -> Result<Task, CoreError> {
        if owner.is_empty() {
            return Err(CoreError::AuthRequired);
        }

        let title = data.title.trim().to_string();
        if title.is_empty() {
            return Err(CoreError::InvalidInput("Task title cannot be empty".to_string()));
        }

        let score_variables = data.score_variables.unwrap_or_default();
        let task = Task {
            id: Uuid::now_v7(),
            owner: owner.to_string(),
            title,
            category: data
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| UNCATEGORIZED.to_string()),
            score_variables,
            calculated_score: leverage_score(&score_variables),
            is_daily3: false,
            daily3_order: None,
            completed: false,
            completed_at: None,
            is_recurring: data.is_recurring,
            is_reusable: data.is_reusable,
            is_after_hours: data.is_after_hours,
            magic_words: data.magic_words.unwrap_or_default(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"INSERT INTO tasks (
                id, owner, title, category,
                outcome, certainty, delay, effort, calculated_score,
                is_daily3, daily3_order, completed, completed_at,
                is_recurring, is_reusable, is_after_hours,
                magic_words, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(task.id)
        .bind(&task.owner)
        .bind(&task.title)
        .bind(&task.category)
        .bind(task.score_variables.outcome)
        .bind(task.score_variables.certainty)
        .bind(task.score_variables.delay)
        .bind(task.score_variables.effort)
        .bind(task.calculated_score)
        .bind(task.is_daily3)
        .bind(task.daily3_order)
        .bind(task.completed)
        .bind(task.completed_at)
        .bind(task.is_recurring)
        .bind(task.is_reusable)
        .bind(task.is_after_hours)
        .bind(&task.magic_words)
        .bind(task.created_at)
        .execute(self.pool())
        .await?;

        self.notify(owner).await;
        Ok(task)
    }

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    async fn find_tasks_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Task>, CoreError> {
        // Ids are stored as blobs; match the user-facing hex form.
        let normalized: String = short_id
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .to_lowercase();
        let mut pattern = String::with_capacity(normalized.len() + 1);
        pattern.push_str(&normalized);
        pattern.push('%');

        let tasks: Vec<Task> = sqlx::query_as("SELECT * FROM tasks WHERE lower(hex(id)) LIKE $1")
            .bind(pattern)
            .fetch_all(self.pool())
            .await?;
        Ok(tasks)
    }

    async fn find_tasks(&self, owner: &str) -> Result<Vec<Task>, CoreError> {
        self.snapshot(owner).await
    }

    async fn update_task(&self, id: Uuid, data: UpdateTaskData) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;

        let _current: Task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE tasks SET ");
        let mut updated = false;

        if let Some(title) = &data.title {
            let title = title.trim();
            if title.is_empty() {
                return Err(CoreError::InvalidInput("Task title cannot be empty".to_string()));
            }
            qb.push("title = ");
            qb.push_bind(title.to_string());
            updated = true;
        }

        if let Some(category) = &data.category {
            if updated {
                qb.push(", ");
            }
            qb.push("category = ");
            qb.push_bind(category.clone());
            updated = true;
        }

        if let Some(vars) = &data.score_variables {
            // The derived score is rewritten with its inputs, never left stale.
            if updated {
                qb.push(", ");
            }
            qb.push("outcome = ");
            qb.push_bind(vars.outcome);
            qb.push(", certainty = ");
            qb.push_bind(vars.certainty);
            qb.push(", delay = ");
            qb.push_bind(vars.delay);
            qb.push(", effort = ");
            qb.push_bind(vars.effort);
            qb.push(", calculated_score = ");
            qb.push_bind(leverage_score(vars));
            updated = true;
        }

        if let Some(magic_words) = &data.magic_words {
            if updated {
                qb.push(", ");
            }
            qb.push("magic_words = ");
            qb.push_bind(magic_words.clone());
            updated = true;
        }

        if let Some(is_recurring) = data.is_recurring {
            if updated {
                qb.push(", ");
            }
            qb.push("is_recurring = ");
            qb.push_bind(is_recurring);
            updated = true;
        }

        if let Some(is_reusable) = data.is_reusable {
            if updated {
                qb.push(", ");
            }
            qb.push("is_reusable = ");
            qb.push_bind(is_reusable);
            updated = true;
        }

        if let Some(is_after_hours) = data.is_after_hours {
            if updated {
                qb.push(", ");
            }
            qb.push("is_after_hours = ");
            qb.push_bind(is_after_hours);
            updated = true;
        }

        if updated {
            qb.push(" WHERE id = ");
            qb.push_bind(id);
            qb.build().execute(&mut *tx).await?;
        }

        let task: Task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        self.notify(&task.owner).await;
        Ok(task)
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError> {
        let task: Task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        // Notes cascade with the task
        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        self.notify(&task.owner).await;
        Ok(())
    }

    async fn toggle_complete(&self, id: Uuid) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;

        let current: Task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        let task: Task = if current.completed {
            sqlx::query_as(
                r#"UPDATE tasks SET completed = FALSE, completed_at = NULL
                WHERE id = $1
                RETURNING *
                "#,
            )
            .bind(id)
            .fetch_one(&mut *tx)
            .await?
        } else {
            // Completing a focus-slot task vacates the slot.
            sqlx::query_as(
                r#"UPDATE tasks
                SET completed = TRUE, completed_at = $1,
                    is_daily3 = FALSE, daily3_order = NULL
                WHERE id = $2
                RETURNING *
                "#,
            )
            .bind(Utc::now())
            .bind(id)
            .fetch_one(&mut *tx)
            .await?
        };

        tx.commit().await?;
        self.notify(&task.owner).await;
        Ok(task)
    }

    async fn subscribe(&self, owner: &str) -> Result<watch::Receiver<Vec<Task>>, CoreError> {
        let seed = self.snapshot(owner).await?;
        Ok(self.hub().subscribe(owner, seed).await)
    }
}
