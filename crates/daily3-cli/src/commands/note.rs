use anyhow::Result;
use daily3_core::repository::Repository;

use crate::cli::{NoteAction, NoteCommand};
use crate::util::{prepare_owner, resolve_task_id};
use crate::views::table::display_notes;

pub async fn note_command(repo: &impl Repository, command: NoteCommand) -> Result<()> {
    prepare_owner(repo).await?;

    match command.action {
        NoteAction::Add { id, content } => {
            let task_id = resolve_task_id(repo, &id).await?;
            repo.add_note(task_id, &content).await?;
            println!("Note logged.");
        }
        NoteAction::List { id } => {
            let task_id = resolve_task_id(repo, &id).await?;
            let notes = repo.find_notes(task_id).await?;
            display_notes(&notes);
        }
    }
    Ok(())
}
