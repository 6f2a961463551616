use anyhow::Result;
use daily3_core::error::CoreError;
use daily3_core::repository::Repository;

use crate::cli::DoneCommand;
use crate::util::{prepare_owner, resolve_task_id};

pub async fn done_task(repo: &impl Repository, command: DoneCommand) -> Result<()> {
    prepare_owner(repo).await?;
    let task_id = resolve_task_id(repo, &command.id).await?;

    // Completion toggles log storage failures instead of aborting.
    match repo.toggle_complete(task_id).await {
        Ok(task) if task.completed => {
            println!("Completed '{}'. Slot freed if it held one.", task.title);
        }
        Ok(task) => {
            println!("Reopened '{}'.", task.title);
        }
        Err(CoreError::Database(e)) => {
            tracing::warn!(%task_id, error = %e, "completion toggle failed");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
