use rd_core::enums::DeliveryStatus;
use rd_db::repos::project::NewProject;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ProjectCommands;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: &ProjectCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        ProjectCommands::Create {
            name,
            description,
            start_date,
            end_date,
            consultant,
        } => {
            let new = NewProject {
                name: name.clone(),
                description: description.clone(),
                start_date: *start_date,
                end_date: *end_date,
                consultant_id: consultant.clone(),
            };
            let project = svc.create_project(&ctx.actor, new).await?;
            output(&project, flags.format)
        }
        ProjectCommands::List { limit } => {
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            output(&svc.list_projects(limit).await?, flags.format)
        }
        ProjectCommands::Get { id } => output(&svc.get_project(id).await?, flags.format),
        ProjectCommands::Transition { id, status } => {
            let status: DeliveryStatus = parse_enum(status, "status")?;
            let project = svc.transition_project(&ctx.actor, id, status).await?;
            output(&project, flags.format)
        }
        ProjectCommands::Delete { id } => {
            svc.delete_project(&ctx.actor, id).await?;
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
    }
}
