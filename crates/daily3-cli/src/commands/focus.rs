use anyhow::Result;
use daily3_core::error::CoreError;
use daily3_core::repository::Repository;

use crate::cli::{FocusAction, FocusCommand};
use crate::util::{prepare_owner, resolve_task_id};
use crate::views::table::display_focus;

pub async fn focus_command(repo: &impl Repository, command: FocusCommand) -> Result<()> {
    let owner = prepare_owner(repo).await?;

    match command.action.unwrap_or(FocusAction::Show) {
        FocusAction::Show => {
            let tasks = repo.active_daily3(&owner).await?;
            display_focus(&tasks);
        }
        FocusAction::Push { id } => {
            let task_id = resolve_task_id(repo, &id).await?;
            match repo.set_daily3(task_id, true).await {
                Ok(task) => println!("'{}' is in today's focus list.", task.title),
                Err(CoreError::CapacityExceeded(cap)) => {
                    println!("All {cap} focus slots are taken. Defer or complete one first.");
                }
                Err(e) => return Err(e.into()),
            }
        }
        FocusAction::Defer { id } => {
            let task_id = resolve_task_id(repo, &id).await?;
            // Defers share the fire-and-forget policy of completion toggles.
            match repo.set_daily3(task_id, false).await {
                Ok(task) => println!("'{}' went back to the vault.", task.title),
                Err(CoreError::Database(e)) => {
                    tracing::warn!(%task_id, error = %e, "defer failed");
                }
                Err(e) => return Err(e.into()),
            }
        }
        FocusAction::Order { ids } => {
            let mut ordered = Vec::with_capacity(ids.len());
            for id in &ids {
                ordered.push(resolve_task_id(repo, id).await?);
            }
            match repo.reorder_daily3(&owner, &ordered).await {
                Ok(()) => {
                    let tasks = repo.active_daily3(&owner).await?;
                    display_focus(&tasks);
                }
                Err(CoreError::Database(e)) => {
                    tracing::warn!(error = %e, "reorder failed");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}
