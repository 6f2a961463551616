use crate::daily::{local_day, start_of_local_day, streak_ending, DAILY_CAPACITY};
use crate::error::CoreError;
use crate::models::{MaintenanceReport, Task};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use std::collections::HashSet;
use uuid::Uuid;

#[async_trait]
impl super::DailyRepository for SqliteRepository {
    async fn set_daily3(&self, id: Uuid, active: bool) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;

        let current: Task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        if active && !current.is_daily3 {
            let occupied: (i64,) = sqlx::query_as(
                "SELECT COUNT(*) FROM tasks WHERE owner = $1 AND is_daily3 = TRUE AND completed = FALSE",
            )
            .bind(&current.owner)
            .fetch_one(&mut *tx)
            .await?;

            if occupied.0 as usize >= DAILY_CAPACITY {
                return Err(CoreError::CapacityExceeded(DAILY_CAPACITY));
            }
        }

        let task: Task = if active {
            // New activations take the next rank after existing ones.
            sqlx::query_as(
                r#"UPDATE tasks
                SET is_daily3 = TRUE,
                    daily3_order = (
                        SELECT COALESCE(MAX(daily3_order) + 1, 0) FROM tasks
                        WHERE owner = $1 AND is_daily3 = TRUE AND completed = FALSE
                    )
                WHERE id = $2
                RETURNING *
                "#,
            )
            .bind(&current.owner)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?
        } else {
            sqlx::query_as(
                r#"UPDATE tasks SET is_daily3 = FALSE, daily3_order = NULL
                WHERE id = $1
                RETURNING *
                "#,
            )
            .bind(id)
            .fetch_one(&mut *tx)
            .await?
        };

        tx.commit().await?;
        self.notify(&task.owner).await;
        Ok(task)
    }

    async fn reorder_daily3(&self, owner: &str, ordered_ids: &[Uuid]) -> Result<(), CoreError> {
        // One transaction, so a partial ordering can never be observed.
        let mut tx = self.pool().begin().await?;
        for (index, id) in ordered_ids.iter().enumerate() {
            sqlx::query("UPDATE tasks SET daily3_order = $1 WHERE id = $2 AND owner = $3")
                .bind(index as i64)
                .bind(id)
                .bind(owner)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        self.notify(owner).await;
        Ok(())
    }

    async fn active_daily3(&self, owner: &str) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as(
            r#"SELECT * FROM tasks
            WHERE owner = $1 AND is_daily3 = TRUE AND completed = FALSE
            ORDER BY daily3_order IS NULL, daily3_order ASC, created_at ASC
            "#,
        )
        .bind(owner)
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn run_daily_maintenance(&self, owner: &str) -> Result<MaintenanceReport, CoreError> {
        let today = Local::now().date_naive().to_string();

        let marker: Option<(i64,)> =
            sqlx::query_as("SELECT 1 FROM daily_markers WHERE owner = $1 AND day = $2")
                .bind(owner)
                .bind(&today)
                .fetch_optional(self.pool())
                .await?;
        if marker.is_some() {
            return Ok(MaintenanceReport::default());
        }

        let day_start = start_of_local_day(Local::now());
        let mut tx = self.pool().begin().await?;

        // Focus tasks completed on a previous day go back to the backlog.
        let slots = sqlx::query(
            r#"UPDATE tasks
            SET is_daily3 = FALSE, daily3_order = NULL, completed = FALSE, completed_at = NULL
            WHERE owner = $1 AND is_daily3 = TRUE AND completed = TRUE AND completed_at < $2
            "#,
        )
        .bind(owner)
        .bind(day_start)
        .execute(&mut *tx)
        .await?;

        // Recurring tasks reopen on the next calendar day.
        let recurring = sqlx::query(
            r#"UPDATE tasks
            SET completed = FALSE, completed_at = NULL
            WHERE owner = $1 AND is_recurring = TRUE AND completed = TRUE AND completed_at < $2
            "#,
        )
        .bind(owner)
        .bind(day_start)
        .execute(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO daily_markers (owner, day) VALUES ($1, $2)")
            .bind(owner)
            .bind(&today)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let report = MaintenanceReport {
            ran: true,
            slots_cleared: slots.rows_affected(),
            recurring_reset: recurring.rows_affected(),
        };
        if report.slots_cleared > 0 || report.recurring_reset > 0 {
            self.notify(owner).await;
        }
        Ok(report)
    }

    async fn current_streak(&self, owner: &str) -> Result<u32, CoreError> {
        let timestamps: Vec<(DateTime<Utc>,)> = sqlx::query_as(
            "SELECT completed_at FROM tasks WHERE owner = $1 AND completed_at IS NOT NULL",
        )
        .bind(owner)
        .fetch_all(self.pool())
        .await?;

        let days: HashSet<_> = timestamps.into_iter().map(|(at,)| local_day(at)).collect();
        Ok(streak_ending(Local::now().date_naive(), &days))
    }

    async fn completed_today(&self, owner: &str) -> Result<u64, CoreError> {
        let day_start = start_of_local_day(Local::now());
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM tasks WHERE owner = $1 AND completed_at >= $2",
        )
        .bind(owner)
        .bind(day_start)
        .fetch_one(self.pool())
        .await?;
        Ok(count.0 as u64)
    }
}
