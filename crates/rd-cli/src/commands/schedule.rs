use crate::cli::GlobalFlags;
use crate::cli::subcommands::ScheduleCommands;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: &ScheduleCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ScheduleCommands::Set {
            task_id,
            company_id,
            start,
            end,
        } => {
            let dates = ctx
                .service
                .set_task_dates(&ctx.actor, task_id, company_id, *start, *end)
                .await?;
            if dates.is_inverted() && !flags.quiet {
                eprintln!("note: end date is before start date for {task_id}/{company_id}");
            }
            output(&dates, flags.format)
        }
        ScheduleCommands::List { task_id } => {
            output(&ctx.service.list_task_dates(task_id).await?, flags.format)
        }
    }
}
