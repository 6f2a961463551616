use anyhow::Result;
use daily3_core::ai::{commit_drafts, GeminiClient};
use daily3_core::models::TaskDraft;
use daily3_core::repository::Repository;
use dialoguer::Confirm;

use crate::cli::PlanCommand;
use crate::util::prepare_owner;
use crate::views::table::display_drafts;

pub async fn plan_command(
    repo: &impl Repository,
    client: &GeminiClient,
    command: PlanCommand,
) -> Result<()> {
    let owner = prepare_owner(repo).await?;
    let categories = category_names(repo, &owner).await?;

    let drafts = client
        .generate_action_plan(&command.goal, &categories)
        .await?;
    review_and_commit(repo, &owner, &drafts, command.yes).await
}

pub(crate) async fn category_names(
    repo: &impl Repository,
    owner: &str,
) -> Result<Vec<String>> {
    Ok(repo
        .find_categories(owner)
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect())
}

/// Drafts are always shown before anything is written; `--yes` skips only
/// the prompt, not the preview.
pub(crate) async fn review_and_commit(
    repo: &impl Repository,
    owner: &str,
    drafts: &[TaskDraft],
    assume_yes: bool,
) -> Result<()> {
    if drafts.is_empty() {
        println!("The model produced no usable drafts.");
        return Ok(());
    }

    display_drafts(drafts);

    if !assume_yes {
        let confirmation = Confirm::new()
            .with_prompt(format!("Add these {} task(s) to the vault?", drafts.len()))
            .default(true)
            .interact()
            .unwrap_or(false);
        if !confirmation {
            println!("No tasks added.");
            return Ok(());
        }
    }

    let created = commit_drafts(repo, owner, drafts).await?;
    println!("Added {} task(s) to the vault.", created.len());
    Ok(())
}
