use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{
    Category, MaintenanceReport, NewTaskData, Note, RemovalPolicy, Task, UpdateTaskData,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use uuid::Uuid;

// Re-export domain modules
pub mod categories;
pub mod daily;
pub mod identity;
pub mod notes;
pub mod reconcile;
pub mod subscription;
pub mod tasks;

use subscription::SnapshotHub;

/// Domain-specific trait for task operations
#[async_trait]
pub trait TaskRepository {
    async fn create_task(&self, owner: &str, data: NewTaskData) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError>;
    async fn find_tasks_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Task>, CoreError>;
    /// Full owner snapshot, sorted by persisted leverage score descending.
    async fn find_tasks(&self, owner: &str) -> Result<Vec<Task>, CoreError>;
    async fn update_task(&self, id: Uuid, data: UpdateTaskData) -> Result<Task, CoreError>;
    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError>;
    async fn toggle_complete(&self, id: Uuid) -> Result<Task, CoreError>;
    /// Push-based snapshot stream for one owner. Every mutation touching the
    /// owner's tasks republishes the full current state; consumers must
    /// treat each emission as authoritative, not a delta.
    async fn subscribe(&self, owner: &str) -> Result<watch::Receiver<Vec<Task>>, CoreError>;
}

/// Domain-specific trait for category operations
#[async_trait]
pub trait CategoryRepository {
    async fn add_category(&self, owner: &str, name: &str) -> Result<(), CoreError>;
    async fn find_categories(&self, owner: &str) -> Result<Vec<Category>, CoreError>;
    async fn remove_category(
        &self,
        owner: &str,
        name: &str,
        policy: RemovalPolicy,
    ) -> Result<(), CoreError>;
    /// Seeds the fixed default set, only when the owner has no categories.
    async fn seed_default_categories(&self, owner: &str) -> Result<bool, CoreError>;
}

/// Domain-specific trait for the daily focus list
#[async_trait]
pub trait DailyRepository {
    /// Toggles focus membership. Activating beyond capacity fails with
    /// `CapacityExceeded`; deactivating clears the slot order.
    async fn set_daily3(&self, id: Uuid, active: bool) -> Result<Task, CoreError>;
    /// Assigns `daily3_order = index` for each id, in one transaction.
    async fn reorder_daily3(&self, owner: &str, ordered_ids: &[Uuid]) -> Result<(), CoreError>;
    async fn active_daily3(&self, owner: &str) -> Result<Vec<Task>, CoreError>;
    /// Once-per-owner-per-local-day sweep: returns stale completed focus
    /// tasks to the backlog and reopens recurring tasks completed before
    /// today.
    async fn run_daily_maintenance(&self, owner: &str) -> Result<MaintenanceReport, CoreError>;
    /// Derived, non-persisted streak of consecutive completion days.
    async fn current_streak(&self, owner: &str) -> Result<u32, CoreError>;
    async fn completed_today(&self, owner: &str) -> Result<u64, CoreError>;
}

/// Domain-specific trait for per-task notes
#[async_trait]
pub trait NoteRepository {
    async fn add_note(&self, task_id: Uuid, content: &str) -> Result<Note, CoreError>;
    async fn find_notes(&self, task_id: Uuid) -> Result<Vec<Note>, CoreError>;
    /// Today's notes across all of an owner's tasks, formatted
    /// `[category] content` for the state disruptor.
    async fn notes_logged_since(
        &self,
        owner: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<String>, CoreError>;
}

/// Domain-specific trait for session identities
#[async_trait]
pub trait IdentityRepository {
    async fn current_identity(&self) -> Result<Option<String>, CoreError>;
    /// Returns the active identity, minting an anonymous one if none exists.
    async fn establish_identity(&self) -> Result<String, CoreError>;
    /// Replaces the active identity with a durable one. Tasks written under
    /// the old identity become orphans until reclaimed.
    async fn link_identity(&self, durable_id: &str) -> Result<String, CoreError>;
    async fn sign_out(&self) -> Result<(), CoreError>;
}

/// Support-tool trait for recovering tasks stranded under a lost identity.
///
/// Both operations read the whole tasks table unscoped; a store that
/// rejects unscoped reads surfaces `PermissionDenied` here, which is the
/// expected outcome under a locked-down deployment.
#[async_trait]
pub trait ReconciliationRepository {
    async fn scan_orphans(&self, current_owner: &str) -> Result<u64, CoreError>;
    async fn claim_orphans(&self, current_owner: &str) -> Result<u64, CoreError>;
}

/// Main repository trait that composes all domain traits
#[async_trait]
pub trait Repository:
    TaskRepository
    + CategoryRepository
    + DailyRepository
    + NoteRepository
    + IdentityRepository
    + ReconciliationRepository
    + Send
    + Sync
{
}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
    hub: SnapshotHub,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            hub: SnapshotHub::new(),
        }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub(crate) fn hub(&self) -> &SnapshotHub {
        &self.hub
    }

    /// Republishes the owner's snapshot to live subscribers after a
    /// mutation. Publish failures are logged, never fatal: the write
    /// already landed and the next subscription re-seeds from the store.
    pub(crate) async fn notify(&self, owner: &str) {
        if !self.hub.has_subscribers(owner).await {
            return;
        }
        match self.snapshot(owner).await {
            Ok(tasks) => self.hub.publish(owner, tasks).await,
            Err(e) => tracing::warn!(owner, error = %e, "failed to refresh task snapshot"),
        }
    }

    /// Owner's full task list, highest leverage first.
    pub(crate) async fn snapshot(&self, owner: &str) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as(
            "SELECT * FROM tasks WHERE owner = $1 ORDER BY calculated_score DESC, created_at ASC",
        )
        .bind(owner)
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }
}

impl Repository for SqliteRepository {}
