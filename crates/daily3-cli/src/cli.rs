use clap::{Parser, Subcommand};

/// Daily 3: a leverage-scored task vault with a three-slot daily focus list
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a task to the vault
    Add(AddCommand),
    /// List vault tasks
    List(ListCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Toggle a task's completion
    #[command(visible_alias = "do")]
    Done(DoneCommand),
    /// Manage today's focus slots
    Focus(FocusCommand),
    /// Manage categories
    Category(CategoryCommand),
    /// Attach or read execution notes
    Note(NoteCommand),
    /// Break a goal into AI-drafted tasks (strategic intake)
    Plan(PlanCommand),
    /// Triage a free-form brain dump into AI-drafted tasks
    Dump(DumpCommand),
    /// Get a coaching nudge built from today's logged activity
    Disrupt,
    /// Show the completion streak
    Streak,
    /// Reclaim tasks stranded under a previous identity
    Reclaim(ReclaimCommand),
    /// Manage the session identity
    Account(AccountCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The task title
    pub title: String,
    /// Category name (advisory; defaults to Uncategorized)
    #[clap(short, long)]
    pub category: Option<String>,
    /// Outcome axis, 0-10
    #[clap(long)]
    pub outcome: Option<f64>,
    /// Certainty axis, 0-10
    #[clap(long)]
    pub certainty: Option<f64>,
    /// Delay axis, 0-10 (1 = immediate payoff)
    #[clap(long)]
    pub delay: Option<f64>,
    /// Effort axis, 0-10
    #[clap(long)]
    pub effort: Option<f64>,
    /// Execution script attached to the task
    #[clap(short, long)]
    pub magic_words: Option<String>,
    /// Keep the task visible in the vault after acting on it
    #[clap(long, conflicts_with = "after_hours")]
    pub reusable: bool,
    /// Surface the task only in the after-hours list
    #[clap(long)]
    pub after_hours: bool,
    /// Reopen automatically the day after completion
    #[clap(long)]
    pub recurring: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Only tasks in this category
    #[clap(short, long)]
    pub category: Option<String>,
    /// Only completed tasks
    #[clap(long)]
    pub completed: bool,
    /// Only after-hours tasks (hidden by default)
    #[clap(long, conflicts_with = "completed")]
    pub after_hours: bool,
    /// Everything, including completed and after-hours tasks
    #[clap(short, long)]
    pub all: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// Task ID (full or unambiguous prefix)
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub outcome: Option<f64>,
    #[arg(long)]
    pub certainty: Option<f64>,
    #[arg(long)]
    pub delay: Option<f64>,
    #[arg(long)]
    pub effort: Option<f64>,

    #[arg(long)]
    pub magic_words: Option<String>,

    #[arg(long)]
    pub recurring: Option<bool>,
    #[arg(long)]
    pub reusable: Option<bool>,
    #[arg(long)]
    pub after_hours: Option<bool>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// Task ID (full or unambiguous prefix)
    pub id: String,
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoneCommand {
    /// Task ID (full or unambiguous prefix)
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct FocusCommand {
    #[command(subcommand)]
    pub action: Option<FocusAction>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FocusAction {
    /// Show today's focus slots (default)
    Show,
    /// Promote a vault task into a free slot
    Push { id: String },
    /// Defer a task back to the vault
    Defer { id: String },
    /// Reorder the active slots by id
    Order { ids: Vec<String> },
}

#[derive(Parser, Debug, Clone)]
pub struct CategoryCommand {
    #[command(subcommand)]
    pub action: CategoryAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CategoryAction {
    /// List categories
    List,
    /// Add a category
    Add { name: String },
    /// Remove a category; its tasks are migrated to Uncategorized unless --policy delete
    Remove {
        name: String,
        /// What happens to the category's tasks: migrate | delete
        #[clap(long, default_value = "migrate")]
        policy: String,
        /// Skip the confirmation prompt
        #[clap(short, long)]
        force: bool,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct NoteCommand {
    #[command(subcommand)]
    pub action: NoteAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum NoteAction {
    /// Append a note to a task
    Add { id: String, content: String },
    /// List a task's notes, newest first
    List { id: String },
}

#[derive(Parser, Debug, Clone)]
pub struct PlanCommand {
    /// The goal to break into tasks
    pub goal: String,
    /// Commit all drafts without the review prompt
    #[clap(short, long)]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DumpCommand {
    /// Free-form brain dump text
    pub text: String,
    /// Commit all drafts without the review prompt
    #[clap(short, long)]
    pub yes: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ReclaimCommand {
    /// Skip the confirmation prompt
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct AccountCommand {
    #[command(subcommand)]
    pub action: AccountAction,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AccountAction {
    /// Show the current identity
    Show,
    /// Establish an identity (anonymous) if none is active
    New,
    /// Replace the active identity with a durable one
    Link { id: String },
    /// Deactivate the current identity
    SignOut,
}
