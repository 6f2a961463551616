use anyhow::Result;
use daily3_core::repository::Repository;
use owo_colors::OwoColorize;

use crate::util::prepare_owner;

pub async fn streak_command(repo: &impl Repository) -> Result<()> {
    let owner = prepare_owner(repo).await?;

    let streak = repo.current_streak(&owner).await?;
    let today = repo.completed_today(&owner).await?;

    match streak {
        0 => println!("No streak yet. Complete a task to start one."),
        1 => println!("{} day streak.", "1".green().bold()),
        n => println!("{} day streak.", n.green().bold()),
    }
    println!("Completed today: {today}");
    Ok(())
}
