use clap::Parser;
use daily3_core::ai::GeminiClient;
use daily3_core::db;
use daily3_core::error::CoreError;
use daily3_core::repository::{SqliteRepository, TaskRepository};
use dialoguer::Confirm;
use owo_colors::{OwoColorize, Style};
use tracing_subscriber::EnvFilter;

use util::resolve_task_id;

mod cli;
mod commands;
mod config;
mod util;
mod views;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match config::Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let db_pool = match db::establish_connection(&config.database_path).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let repository = SqliteRepository::new(db_pool);

    let cli = cli::Cli::parse();

    let result = match cli.command {
        cli::Commands::Add(command) => commands::add::add_task(&repository, command).await,
        cli::Commands::List(command) => commands::list::list_tasks(&repository, command).await,
        cli::Commands::Edit(command) => commands::edit::edit_task(&repository, command).await,
        cli::Commands::Delete(command) => {
            let task_id = match resolve_task_id(&repository, &command.id).await {
                Ok(id) => id,
                Err(e) => {
                    handle_error(e.into());
                    return;
                }
            };
            let task = match repository.find_task_by_id(task_id).await {
                Ok(Some(t)) => t,
                Ok(None) => {
                    let error_style = Style::new().red().bold();
                    eprintln!(
                        "{} Task with ID '{}' not found.",
                        "Error:".style(error_style),
                        task_id
                    );
                    return;
                }
                Err(e) => {
                    handle_error(e.into());
                    return;
                }
            };

            if !command.force {
                let confirmation = Confirm::new()
                    .with_prompt(format!(
                        "Delete '{}' and all of its notes?",
                        task.title
                    ))
                    .default(false)
                    .interact()
                    .unwrap_or(false);

                if !confirmation {
                    println!("Deletion cancelled.");
                    return;
                }
            }
            commands::delete::delete_task(&repository, task_id).await
        }
        cli::Commands::Done(command) => commands::done::done_task(&repository, command).await,
        cli::Commands::Focus(command) => {
            commands::focus::focus_command(&repository, command).await
        }
        cli::Commands::Category(command) => {
            commands::category::category_command(&repository, command).await
        }
        cli::Commands::Note(command) => commands::note::note_command(&repository, command).await,
        cli::Commands::Plan(command) => match GeminiClient::new(config.gemini()) {
            Ok(client) => commands::plan::plan_command(&repository, &client, command).await,
            Err(e) => Err(e.into()),
        },
        cli::Commands::Dump(command) => match GeminiClient::new(config.gemini()) {
            Ok(client) => commands::dump::dump_command(&repository, &client, command).await,
            Err(e) => Err(e.into()),
        },
        cli::Commands::Disrupt => match GeminiClient::new(config.gemini()) {
            Ok(client) => commands::disrupt::disrupt_command(&repository, &client).await,
            Err(e) => Err(e.into()),
        },
        cli::Commands::Streak => commands::streak::streak_command(&repository).await,
        cli::Commands::Reclaim(command) => {
            commands::reclaim::reclaim_command(&repository, command).await
        }
        cli::Commands::Account(command) => {
            commands::account::account_command(&repository, command).await
        }
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {} not found.", "Error:".style(error_style), s);
            }
            CoreError::AmbiguousId(tasks) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, title) in tasks {
                    eprintln!("  {} ({})", id.yellow(), title);
                }
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::CapacityExceeded(cap) => {
                eprintln!(
                    "{} The focus list holds at most {} tasks.",
                    "Error:".style(error_style),
                    cap.yellow()
                );
            }
            CoreError::PermissionDenied(s) => {
                eprintln!("{} Permission denied: {}", "Error:".style(error_style), s);
            }
            CoreError::AuthRequired => {
                eprintln!(
                    "{} No identity is active. Run `daily3 account new` first.",
                    "Error:".style(error_style)
                );
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
