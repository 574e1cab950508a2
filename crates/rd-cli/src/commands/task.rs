use rd_core::enums::{TaskPriority, TaskStatus};
use rd_db::repos::task::NewTask;
use rd_db::updates::task::TaskUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaskCommands;
use crate::commands::shared::parse::{parse_enum, parse_optional_enum};
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: &TaskCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let svc = &ctx.service;
    match action {
        TaskCommands::Create {
            sub_project_id,
            title,
            description,
            priority,
            due_date,
        } => {
            let priority: Option<TaskPriority> =
                parse_optional_enum(priority.as_deref(), "priority")?;
            let new = NewTask {
                title: title.clone(),
                description: description.clone(),
                priority: priority.unwrap_or_default(),
                due_date: *due_date,
            };
            let task = svc.create_task(&ctx.actor, sub_project_id, new).await?;
            output(&task, flags.format)
        }
        TaskCommands::List { sub_project_id } => {
            output(&svc.list_tasks(sub_project_id).await?, flags.format)
        }
        TaskCommands::Get { id } => output(&svc.get_task(id).await?, flags.format),
        TaskCommands::Update {
            id,
            title,
            description,
            clear_description,
            priority,
            due_date,
            clear_due_date,
        } => {
            let mut builder = TaskUpdateBuilder::new();
            if let Some(title) = title {
                builder = builder.title(title.clone());
            }
            if *clear_description {
                builder = builder.description(None);
            } else if let Some(description) = description {
                builder = builder.description(Some(description.clone()));
            }
            if let Some(priority) = parse_optional_enum::<TaskPriority>(priority.as_deref(), "priority")? {
                builder = builder.priority(priority);
            }
            if *clear_due_date {
                builder = builder.due_date(None);
            } else if due_date.is_some() {
                builder = builder.due_date(*due_date);
            }

            let update = builder.build();
            if update.is_empty() {
                anyhow::bail!("task update requires at least one field flag");
            }
            let task = svc.update_task(&ctx.actor, id, update).await?;
            output(&task, flags.format)
        }
        TaskCommands::Transition { id, status } => {
            let status: TaskStatus = parse_enum(status, "status")?;
            let task = svc.transition_task(&ctx.actor, id, status).await?;
            output(&task, flags.format)
        }
    }
}
