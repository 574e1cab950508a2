use rd_core::enums::DeliveryStatus;
use rd_db::repos::sub_project::NewSubProject;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SubProjectCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: &SubProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        SubProjectCommands::Create {
            project_id,
            name,
            description,
            start_date,
            end_date,
        } => {
            let new = NewSubProject {
                name: name.clone(),
                description: description.clone(),
                start_date: *start_date,
                end_date: *end_date,
            };
            let sub_project = svc.create_sub_project(&ctx.actor, project_id, new).await?;
            output(&sub_project, flags.format)
        }
        SubProjectCommands::List { project_id } => {
            output(&svc.list_sub_projects(project_id).await?, flags.format)
        }
        SubProjectCommands::Get { id } => output(&svc.get_sub_project(id).await?, flags.format),
        SubProjectCommands::Transition { id, status } => {
            let status: DeliveryStatus = parse_enum(status, "status")?;
            let sub_project = svc.transition_sub_project(&ctx.actor, id, status).await?;
            output(&sub_project, flags.format)
        }
    }
}
