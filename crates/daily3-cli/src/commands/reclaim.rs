use anyhow::Result;
use daily3_core::repository::Repository;
use dialoguer::Confirm;

use crate::cli::ReclaimCommand;
use crate::util::prepare_owner;

pub async fn reclaim_command(repo: &impl Repository, command: ReclaimCommand) -> Result<()> {
    let owner = prepare_owner(repo).await?;

    let orphans = repo.scan_orphans(&owner).await?;
    if orphans == 0 {
        println!("No stranded tasks found.");
        return Ok(());
    }

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Claim {orphans} task(s) written under other identities?"
            ))
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmation {
            println!("Nothing claimed.");
            return Ok(());
        }
    }

    let claimed = repo.claim_orphans(&owner).await?;
    println!("Claimed {claimed} task(s).");
    Ok(())
}
