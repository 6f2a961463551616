use anyhow::Result;
use daily3_core::ai::GeminiClient;
use daily3_core::repository::Repository;

use crate::cli::DumpCommand;
use crate::commands::plan::{category_names, review_and_commit};
use crate::util::prepare_owner;

pub async fn dump_command(
    repo: &impl Repository,
    client: &GeminiClient,
    command: DumpCommand,
) -> Result<()> {
    let owner = prepare_owner(repo).await?;
    let categories = category_names(repo, &owner).await?;

    let drafts = client.parse_bulk_tasks(&command.text, &categories).await?;
    review_and_commit(repo, &owner, &drafts, command.yes).await
}
