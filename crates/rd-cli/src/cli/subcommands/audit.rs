use clap::Args;

#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    /// project, sub-project, task, company, assignment, task-date-override, evaluation-report.
    #[arg(long)]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub entity_id: Option<String>,
    /// created, updated, status-changed, assigned, unassigned, scheduled, deleted.
    #[arg(long)]
    pub action: Option<String>,
    #[arg(long = "by")]
    pub actor_id: Option<String>,
    #[arg(long)]
    pub limit: Option<u32>,
}
