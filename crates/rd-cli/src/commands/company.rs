use rd_db::repos::company::NewCompany;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CompanyCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(
    action: &CompanyCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CompanyCommands::Register {
            name,
            contact_name,
            contact_email,
            contact_phone,
        } => {
            let new = NewCompany {
                name: name.clone(),
                contact_name: contact_name.clone(),
                contact_email: contact_email.clone(),
                contact_phone: contact_phone.clone(),
            };
            output(&ctx.service.register_company(&ctx.actor, new).await?, flags.format)
        }
        CompanyCommands::List { limit } => {
            let limit = effective_limit(*limit, flags.limit, ctx.config.general.default_limit);
            output(&ctx.service.list_companies(limit).await?, flags.format)
        }
        CompanyCommands::Get { id } => output(&ctx.service.get_company(id).await?, flags.format),
    }
}
