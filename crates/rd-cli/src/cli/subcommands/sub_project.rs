use chrono::NaiveDate;
use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum SubProjectCommands {
    /// Create a sub-project under a project.
    Create {
        /// Parent project ID.
        project_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        end_date: Option<NaiveDate>,
    },
    /// List the sub-projects of a project.
    List { project_id: String },
    /// Get a sub-project by ID.
    Get { id: String },
    /// Move a sub-project to another status.
    Transition {
        id: String,
        #[arg(long)]
        status: String,
    },
}
