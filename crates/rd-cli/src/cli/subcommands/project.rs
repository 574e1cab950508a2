use chrono::NaiveDate;
use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Create a project.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Start date (YYYY-MM-DD).
        #[arg(long)]
        start_date: Option<NaiveDate>,
        /// End date (YYYY-MM-DD).
        #[arg(long)]
        end_date: Option<NaiveDate>,
        /// Consultant responsible for the project.
        #[arg(long)]
        consultant: Option<String>,
    },
    /// List projects, newest first.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a project by ID.
    Get { id: String },
    /// Move a project to another status (planned, active, on-hold, completed).
    Transition {
        id: String,
        #[arg(long)]
        status: String,
    },
    /// Delete a project that has no sub-projects.
    Delete { id: String },
}
