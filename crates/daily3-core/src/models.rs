use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Sentinel category for tasks that belong to no named category.
///
/// Category references on tasks are advisory strings, not enforced foreign
/// keys; migration on category removal rewrites them to this value.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// The four inputs of the leverage formula, each intended range 0-10.
///
/// `delay` and `effort` are practically clamped to >= 1 by the scoring
/// function's denominator floor, never by the data layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ScoreVariables {
    pub outcome: f64,
    pub certainty: f64,
    pub delay: f64,
    pub effort: f64,
}

impl Default for ScoreVariables {
    fn default() -> Self {
        Self {
            outcome: 5.0,
            certainty: 5.0,
            delay: 5.0,
            effort: 5.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    /// Identifier of the owning user. Every query except orphan
    /// reconciliation filters on exact match of this field.
    pub owner: String,
    pub title: String,
    pub category: String,
    #[sqlx(flatten)]
    pub score_variables: ScoreVariables,
    /// Derived from `score_variables`, recomputed on every write that
    /// touches them. Never independently settable.
    pub calculated_score: f64,
    /// True while the task occupies one of the three focus slots.
    pub is_daily3: bool,
    /// Rank among active focus tasks; None sorts last.
    pub daily3_order: Option<i64>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    /// Recurring tasks are reopened by the daily maintenance sweep.
    pub is_recurring: bool,
    pub is_reusable: bool,
    pub is_after_hours: bool,
    /// Free-text execution script attached to the task.
    pub magic_words: String,
    pub created_at: DateTime<Utc>,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            owner: String::new(),
            title: String::new(),
            category: UNCATEGORIZED.to_string(),
            score_variables: ScoreVariables::default(),
            calculated_score: 0.0,
            is_daily3: false,
            daily3_order: None,
            completed: false,
            completed_at: None,
            is_recurring: false,
            is_reusable: false,
            is_after_hours: false,
            magic_words: String::new(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub owner: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Append-only log entry attached to exactly one task.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: Uuid,
    pub task_id: Uuid,
    pub owner: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub title: String,
    pub category: Option<String>,
    pub score_variables: Option<ScoreVariables>,
    pub magic_words: Option<String>,
    pub is_reusable: bool,
    pub is_after_hours: bool,
    pub is_recurring: bool,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub category: Option<String>,
    pub score_variables: Option<ScoreVariables>,
    pub magic_words: Option<String>,
    pub is_recurring: Option<bool>,
    pub is_reusable: Option<bool>,
    pub is_after_hours: Option<bool>,
}

/// What happens to a category's tasks when the category is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalPolicy {
    /// Rewrite referencing tasks to [`UNCATEGORIZED`].
    Migrate,
    /// Delete referencing tasks outright.
    Delete,
}

impl std::fmt::Display for RemovalPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemovalPolicy::Migrate => write!(f, "migrate"),
            RemovalPolicy::Delete => write!(f, "delete"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid removal policy: {0}")]
pub struct ParseRemovalPolicyError(String);

impl FromStr for RemovalPolicy {
    type Err = ParseRemovalPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "migrate" => Ok(RemovalPolicy::Migrate),
            "delete" => Ok(RemovalPolicy::Delete),
            _ => Err(ParseRemovalPolicyError(s.to_string())),
        }
    }
}

/// A model-generated candidate task awaiting human review.
///
/// Field names mirror the wire contract the prompt asks the model for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "hormoziScore")]
    pub hormozi_score: f64,
    #[serde(rename = "magicWords", default)]
    pub magic_words: String,
}

/// Result of the once-per-day maintenance pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    /// False when the marker showed maintenance already ran today.
    pub ran: bool,
    /// Stale completed focus tasks returned to the backlog.
    pub slots_cleared: u64,
    /// Recurring tasks reopened for reuse.
    pub recurring_reset: u64,
}
