use crate::cli::GlobalFlags;
use crate::cli::subcommands::AssignCommands;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: &AssignCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        AssignCommands::Add {
            sub_project_id,
            companies,
        } => {
            let created = svc
                .assign_companies(&ctx.actor, sub_project_id, companies)
                .await?;
            if created.is_empty() && !flags.quiet {
                eprintln!("every selected company was already assigned to {sub_project_id}");
            }
            output(&created, flags.format)
        }
        AssignCommands::Remove {
            sub_project_id,
            company_id,
        } => {
            let removed = svc
                .remove_assignment(&ctx.actor, sub_project_id, company_id)
                .await?;
            output(&removed, flags.format)
        }
        AssignCommands::List {
            sub_project_id,
            all,
        } => output(&svc.list_assignments(sub_project_id, *all).await?, flags.format),
        AssignCommands::Progress {
            sub_project_id,
            company_id,
        } => output(
            &svc.company_progress(sub_project_id, company_id).await?,
            flags.format,
        ),
    }
}
