use anyhow::Result;
use daily3_core::models::{NewTaskData, ScoreVariables};
use daily3_core::repository::Repository;

use crate::cli::AddCommand;
use crate::util::{prepare_owner, short_id};
use crate::views::table::LeverageBand;

pub async fn add_task(repo: &impl Repository, command: AddCommand) -> Result<()> {
    let owner = prepare_owner(repo).await?;

    let defaults = ScoreVariables::default();
    let score_variables = ScoreVariables {
        outcome: command.outcome.unwrap_or(defaults.outcome),
        certainty: command.certainty.unwrap_or(defaults.certainty),
        delay: command.delay.unwrap_or(defaults.delay),
        effort: command.effort.unwrap_or(defaults.effort),
    };

    let task = repo
        .create_task(
            &owner,
            NewTaskData {
                title: command.title,
                category: command.category,
                score_variables: Some(score_variables),
                magic_words: command.magic_words,
                is_reusable: command.reusable,
                is_after_hours: command.after_hours,
                is_recurring: command.recurring,
            },
        )
        .await?;

    println!(
        "Added '{}' ({}) with leverage {:.2} ({})",
        task.title,
        short_id(&task.id),
        task.calculated_score,
        LeverageBand::from_score(task.calculated_score).label()
    );
    Ok(())
}
