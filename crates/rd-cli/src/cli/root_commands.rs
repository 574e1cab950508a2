use clap::{Args, Subcommand};

use super::subcommands::{
    AssignCommands, AuditArgs, CompanyCommands, ProjectCommands, ReportCommands,
    ScheduleCommands, SubProjectCommands, TaskCommands,
};

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// Manage sub-projects (workstreams inside a project).
    #[command(name = "sub-project", alias = "sp")]
    SubProject {
        #[command(subcommand)]
        action: SubProjectCommands,
    },
    /// Manage tasks inside a sub-project.
    Task {
        #[command(subcommand)]
        action: TaskCommands,
    },
    /// Manage client companies.
    Company {
        #[command(subcommand)]
        action: CompanyCommands,
    },
    /// Assign companies to sub-projects and track their progress.
    Assign {
        #[command(subcommand)]
        action: AssignCommands,
    },
    /// Per-company task dates.
    Schedule {
        #[command(subcommand)]
        action: ScheduleCommands,
    },
    /// Evaluation reports and the report gate.
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },
    /// Query the audit trail.
    Audit(AuditArgs),
    /// Print the JSON Schema of an entity.
    Schema(SchemaArgs),
    /// Run the HTTP API.
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Entity name (project, sub-project, task, company, assignment,
    /// task-dates, report, audit-entry, event).
    pub entity: String,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override `server.host`.
    #[arg(long)]
    pub host: Option<String>,

    /// Override `server.port`.
    #[arg(long)]
    pub port: Option<u16>,

    /// Enable permissive CORS regardless of `server.cors_enabled`.
    #[arg(long)]
    pub cors: bool,
}
