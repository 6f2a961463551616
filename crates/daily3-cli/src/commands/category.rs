use anyhow::Result;
use daily3_core::models::RemovalPolicy;
use daily3_core::repository::Repository;
use dialoguer::Confirm;

use crate::cli::{CategoryAction, CategoryCommand};
use crate::util::prepare_owner;
use crate::views::table::display_categories;

pub async fn category_command(repo: &impl Repository, command: CategoryCommand) -> Result<()> {
    let owner = prepare_owner(repo).await?;

    match command.action {
        CategoryAction::List => {
            let categories = repo.find_categories(&owner).await?;
            display_categories(&categories);
        }
        CategoryAction::Add { name } => {
            repo.add_category(&owner, &name).await?;
            println!("Category '{name}' is available.");
        }
        CategoryAction::Remove {
            name,
            policy,
            force,
        } => {
            let policy: RemovalPolicy = policy.parse()?;

            if policy == RemovalPolicy::Delete && !force {
                let confirmation = Confirm::new()
                    .with_prompt(format!(
                        "Delete category '{name}' AND every task in it?"
                    ))
                    .default(false)
                    .interact()
                    .unwrap_or(false);
                if !confirmation {
                    println!("Removal cancelled.");
                    return Ok(());
                }
            }

            repo.remove_category(&owner, &name, policy).await?;
            match policy {
                RemovalPolicy::Migrate => {
                    println!("Removed '{name}'; its tasks moved to Uncategorized.")
                }
                RemovalPolicy::Delete => {
                    println!("Removed '{name}' and its tasks.")
                }
            }
        }
    }
    Ok(())
}
