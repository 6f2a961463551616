use crate::error::CoreError;
use crate::models::Note;
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[async_trait]
impl super::NoteRepository for SqliteRepository {
    async fn add_note(&self, task_id: Uuid, content: &str) -> Result<Note, CoreError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(CoreError::InvalidInput("Note content cannot be empty".to_string()));
        }

        // Notes inherit their owner from the parent task.
        let owner: (String,) = sqlx::query_as("SELECT owner FROM tasks WHERE id = $1")
            .bind(task_id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| CoreError::NotFound(task_id.to_string()))?;

        let note = Note {
            id: Uuid::now_v7(),
            task_id,
            owner: owner.0,
            content: content.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO notes (id, task_id, owner, content, created_at) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(note.id)
        .bind(note.task_id)
        .bind(&note.owner)
        .bind(&note.content)
        .bind(note.created_at)
        .execute(self.pool())
        .await?;

        Ok(note)
    }

    async fn find_notes(&self, task_id: Uuid) -> Result<Vec<Note>, CoreError> {
        let notes = sqlx::query_as(
            "SELECT * FROM notes WHERE task_id = $1 ORDER BY created_at DESC",
        )
        .bind(task_id)
        .fetch_all(self.pool())
        .await?;
        Ok(notes)
    }

    async fn notes_logged_since(
        &self,
        owner: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<String>, CoreError> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"SELECT t.category, n.content
            FROM notes n
            JOIN tasks t ON t.id = n.task_id
            WHERE n.owner = $1 AND n.created_at >= $2
            ORDER BY n.created_at ASC
            "#,
        )
        .bind(owner)
        .bind(cutoff)
        .fetch_all(self.pool())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(category, content)| format!("[{}] {}", category, content))
            .collect())
    }
}
