//! # Daily 3 Core Library
//!
//! A leverage-scored personal task backlog ("the Vault") with a
//! three-slot daily focus list, AI-assisted task drafting, and
//! owner-scoped SQLite persistence.
//!
//! ## Features
//!
//! - **Leverage Scoring**: `(outcome * certainty) / (delay * effort)`
//!   computed on every write and persisted, so consumers only ever sort by
//!   the stored value
//! - **Daily Focus Policy**: at most three active focus slots with manual
//!   ordering, once-per-day maintenance, and streak tracking
//! - **Push Subscriptions**: per-owner snapshot streams over tokio watch
//!   channels; every mutation republishes the authoritative task list
//! - **AI Draft Generator**: turns goals and brain dumps into reviewed
//!   task drafts via a single-prompt text-completion request
//! - **Orphan Reconciliation**: support tool for reclaiming records
//!   stranded under a replaced session identity
//!
//! ## Core Modules
//!
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and transfer objects
//! - [`scoring`]: The pure leverage formula
//! - [`daily`]: Focus-list ordering, calendar-day boundaries, streaks
//! - [`repository`]: Data access layer with Repository pattern
//! - [`ai`]: Draft generator and text-completion client
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use daily3_core::{
//!     db,
//!     models::NewTaskData,
//!     repository::{IdentityRepository, Repository, SqliteRepository, TaskRepository},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), daily3_core::error::CoreError> {
//!     let pool = db::establish_connection("daily3.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     let owner = repo.establish_identity().await?;
//!     let task = repo
//!         .create_task(
//!             &owner,
//!             NewTaskData {
//!                 title: "Call vendor".to_string(),
//!                 ..Default::default()
//!             },
//!         )
//!         .await?;
//!     println!("Created task: {} (score {})", task.title, task.calculated_score);
//!
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod daily;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod scoring;
