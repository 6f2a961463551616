use anyhow::Result;
use daily3_core::repository::Repository;

use crate::cli::{AccountAction, AccountCommand};

pub async fn account_command(repo: &impl Repository, command: AccountCommand) -> Result<()> {
    match command.action {
        AccountAction::Show => match repo.current_identity().await? {
            Some(id) => println!("Active identity: {id}"),
            None => println!("No active identity. One is minted on first use."),
        },
        AccountAction::New => {
            let id = repo.establish_identity().await?;
            println!("Active identity: {id}");
        }
        AccountAction::Link { id } => {
            let linked = repo.link_identity(&id).await?;
            println!(
                "Linked identity {linked}. Run `daily3 reclaim` to pull in tasks \
                 written under the old one."
            );
        }
        AccountAction::SignOut => {
            repo.sign_out().await?;
            println!("Signed out.");
        }
    }
    Ok(())
}
