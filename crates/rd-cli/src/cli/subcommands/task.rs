use chrono::NaiveDate;
use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum TaskCommands {
    /// Create a task in a sub-project.
    Create {
        /// Sub-project ID.
        sub_project_id: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// low, medium, or high.
        #[arg(long)]
        priority: Option<String>,
        /// Default due date for every assigned company (YYYY-MM-DD).
        #[arg(long)]
        due_date: Option<NaiveDate>,
    },
    /// List the tasks of a sub-project.
    List { sub_project_id: String },
    /// Get a task by ID.
    Get { id: String },
    /// Edit task fields. Status changes go through `transition`.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,
        #[arg(long)]
        clear_description: bool,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long, conflicts_with = "clear_due_date")]
        due_date: Option<NaiveDate>,
        #[arg(long)]
        clear_due_date: bool,
    },
    /// Move a task to another status (pending, in-review, completed, cancelled).
    Transition {
        id: String,
        #[arg(long)]
        status: String,
    },
}
