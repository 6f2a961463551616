use anyhow::Result;
use daily3_core::error::CoreError;
use daily3_core::repository::Repository;
use uuid::Uuid;

/// Resolves a user-supplied id that may be a full UUID or a hex prefix.
pub async fn resolve_task_id(repo: &impl Repository, input: &str) -> Result<Uuid, CoreError> {
    if let Ok(id) = Uuid::parse_str(input) {
        return Ok(id);
    }
    let matches = repo.find_tasks_by_short_id_prefix(input).await?;
    match matches.len() {
        0 => Err(CoreError::NotFound(format!("task matching '{input}'"))),
        1 => Ok(matches[0].id),
        _ => Err(CoreError::AmbiguousId(
            matches
                .iter()
                .map(|t| (short_id(&t.id), t.title.clone()))
                .collect(),
        )),
    }
}

/// First eight hex characters of a task id, the form shown in listings.
pub fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

/// Establishes the session owner and runs the per-day housekeeping that the
/// first data access of the day is responsible for: seeding the default
/// categories and the maintenance sweep that vacates stale focus slots.
pub async fn prepare_owner(repo: &impl Repository) -> Result<String> {
    let owner = repo.establish_identity().await?;
    repo.seed_default_categories(&owner).await?;
    let report = repo.run_daily_maintenance(&owner).await?;
    if report.ran {
        tracing::debug!(
            slots_cleared = report.slots_cleared,
            recurring_reset = report.recurring_reset,
            "daily maintenance ran"
        );
    }
    Ok(owner)
}
