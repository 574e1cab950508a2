use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// Record the evaluation of a company. Only allowed once every task is completed.
    Create {
        sub_project_id: String,
        company_id: String,
        /// Ratings are integers from 1 to 5.
        #[arg(long)]
        overall: i32,
        #[arg(long)]
        quality: i32,
        #[arg(long)]
        timeliness: i32,
        #[arg(long)]
        communication: i32,
        #[arg(long)]
        strengths: Option<String>,
        #[arg(long)]
        improvements: Option<String>,
        #[arg(long)]
        recommendations: Option<String>,
        #[arg(long)]
        feedback: Option<String>,
    },
    /// List the reports of a sub-project.
    List { sub_project_id: String },
    /// Get the report for a company.
    Get {
        sub_project_id: String,
        company_id: String,
    },
    /// Check the report gate for a company.
    Eligible {
        sub_project_id: String,
        company_id: String,
    },
}
