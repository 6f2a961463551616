use anyhow::Result;
use daily3_core::repository::Repository;

use crate::cli::ListCommand;
use crate::util::prepare_owner;
use crate::views::table::display_vault;

pub async fn list_tasks(repo: &impl Repository, command: ListCommand) -> Result<()> {
    let owner = prepare_owner(repo).await?;
    let tasks = repo.find_tasks(&owner).await?;

    let filtered: Vec<_> = tasks
        .into_iter()
        .filter(|task| {
            if command.all {
                return true;
            }
            if command.completed {
                return task.completed;
            }
            if command.after_hours {
                return task.is_after_hours && !task.completed;
            }
            // The default vault view: open, business-hours work.
            !task.completed && !task.is_after_hours
        })
        .filter(|task| {
            command
                .category
                .as_ref()
                .map(|c| task.category.eq_ignore_ascii_case(c))
                .unwrap_or(true)
        })
        .collect();

    display_vault(&filtered);
    Ok(())
}
