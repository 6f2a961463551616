use anyhow::Result;
use chrono::Local;
use daily3_core::ai::GeminiClient;
use daily3_core::daily::start_of_local_day;
use daily3_core::repository::Repository;
use owo_colors::OwoColorize;

use crate::util::prepare_owner;

pub async fn disrupt_command(repo: &impl Repository, client: &GeminiClient) -> Result<()> {
    let owner = prepare_owner(repo).await?;

    let cutoff = start_of_local_day(Local::now());
    let logs = repo.notes_logged_since(&owner, cutoff).await?;

    // Never fails: the client falls back to a canned nudge on any error.
    let message = client.generate_state_disruptor(&logs).await;
    println!("{}", message.bold());
    Ok(())
}
