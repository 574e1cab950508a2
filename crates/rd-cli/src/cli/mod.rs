pub mod global;
pub mod root_commands;
pub mod subcommands;

use clap::Parser;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Readiness - export-readiness delivery workflow.
#[derive(Parser, Debug)]
#[command(name = "rdy", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format.
    #[arg(short, long, global = true, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Maximum number of results for list commands.
    #[arg(long, global = true)]
    pub limit: Option<u32>,

    /// Only print errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print debug logs.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root (defaults to the nearest directory holding `.readiness`).
    #[arg(long, global = true)]
    pub project: Option<String>,

    /// Actor recorded in the audit trail (defaults to `general.default_actor`).
    #[arg(long, global = true, env = "READINESS_ACTOR")]
    pub actor: Option<String>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            project: self.project.clone(),
            actor: self.actor.clone(),
        }
    }
}
