use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, ctx: AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Project { action } => commands::project::handle(&action, &ctx, flags).await,
        Commands::SubProject { action } => {
            commands::sub_project::handle(&action, &ctx, flags).await
        }
        Commands::Task { action } => commands::task::handle(&action, &ctx, flags).await,
        Commands::Company { action } => commands::company::handle(&action, &ctx, flags).await,
        Commands::Assign { action } => commands::assign::handle(&action, &ctx, flags).await,
        Commands::Schedule { action } => commands::schedule::handle(&action, &ctx, flags).await,
        Commands::Report { action } => commands::report::handle(&action, &ctx, flags).await,
        Commands::Audit(args) => commands::audit::handle(&args, &ctx, flags).await,
        Commands::Schema(args) => commands::schema::handle(&args, flags),
        Commands::Serve(args) => commands::serve::handle(&args, ctx).await,
    }
}
