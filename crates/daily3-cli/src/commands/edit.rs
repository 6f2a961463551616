use anyhow::Result;
use daily3_core::error::CoreError;
use daily3_core::models::{ScoreVariables, UpdateTaskData};
use daily3_core::repository::Repository;

use crate::cli::EditCommand;
use crate::util::{prepare_owner, resolve_task_id};
use crate::views::table::LeverageBand;

pub async fn edit_task(repo: &impl Repository, command: EditCommand) -> Result<()> {
    prepare_owner(repo).await?;
    let task_id = resolve_task_id(repo, &command.id).await?;

    let axes_touched = command.outcome.is_some()
        || command.certainty.is_some()
        || command.delay.is_some()
        || command.effort.is_some();

    // Partial axis edits are merged against the stored variables so the
    // untouched axes survive the full-struct write.
    let score_variables = if axes_touched {
        let current = repo
            .find_task_by_id(task_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("task with ID '{task_id}'")))?
            .score_variables;
        Some(ScoreVariables {
            outcome: command.outcome.unwrap_or(current.outcome),
            certainty: command.certainty.unwrap_or(current.certainty),
            delay: command.delay.unwrap_or(current.delay),
            effort: command.effort.unwrap_or(current.effort),
        })
    } else {
        None
    };

    let task = repo
        .update_task(
            task_id,
            UpdateTaskData {
                title: command.title,
                category: command.category,
                score_variables,
                magic_words: command.magic_words,
                is_recurring: command.recurring,
                is_reusable: command.reusable,
                is_after_hours: command.after_hours,
            },
        )
        .await?;

    println!(
        "Updated '{}', leverage now {:.2} ({})",
        task.title,
        task.calculated_score,
        LeverageBand::from_score(task.calculated_score).label()
    );
    Ok(())
}
