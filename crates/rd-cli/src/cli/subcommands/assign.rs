use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum AssignCommands {
    /// Assign one or more companies to a sub-project.
    Add {
        sub_project_id: String,
        /// Company ID (repeatable).
        #[arg(long = "company", required = true)]
        companies: Vec<String>,
    },
    /// Remove a company from a sub-project. History is kept.
    Remove {
        sub_project_id: String,
        company_id: String,
    },
    /// List the assignments of a sub-project.
    List {
        sub_project_id: String,
        /// Include removed assignments.
        #[arg(long)]
        all: bool,
    },
    /// Completion percentage of a company within a sub-project.
    Progress {
        sub_project_id: String,
        company_id: String,
    },
}
