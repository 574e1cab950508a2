use chrono::NaiveDate;
use clap::Subcommand;

#[derive(Clone, Debug, Subcommand)]
pub enum ScheduleCommands {
    /// Set the dates of a task for one assigned company.
    Set {
        task_id: String,
        company_id: String,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// List the per-company dates of a task.
    List { task_id: String },
}
