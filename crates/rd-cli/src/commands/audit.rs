use rd_core::enums::{AuditAction, EntityType};
use rd_db::repos::audit::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuditArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_optional_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &AuditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = build_filter(args, flags.limit, ctx.config.general.default_limit)?;
    output(&ctx.service.query_audit(&filter).await?, flags.format)
}

fn build_filter(args: &AuditArgs, global: Option<u32>, fallback: u32) -> anyhow::Result<AuditFilter> {
    Ok(AuditFilter {
        entity_type: parse_optional_enum::<EntityType>(args.entity_type.as_deref(), "entity type")?,
        entity_id: args.entity_id.clone(),
        action: parse_optional_enum::<AuditAction>(args.action.as_deref(), "action")?,
        actor_id: args.actor_id.clone(),
        limit: Some(effective_limit(args.limit, global, fallback)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> AuditArgs {
        AuditArgs {
            entity_type: None,
            entity_id: None,
            action: None,
            actor_id: None,
            limit: None,
        }
    }

    #[test]
    fn filter_parses_enums_and_limit() {
        let filter = build_filter(
            &AuditArgs {
                entity_type: Some("evaluation-report".into()),
                action: Some("created".into()),
                ..args()
            },
            Some(5),
            20,
        )
        .unwrap();
        assert_eq!(filter.entity_type, Some(EntityType::EvaluationReport));
        assert_eq!(filter.action, Some(AuditAction::Created));
        assert_eq!(filter.limit, Some(5));
    }

    #[test]
    fn bad_entity_type_is_rejected() {
        let err = build_filter(
            &AuditArgs {
                entity_type: Some("invoice".into()),
                ..args()
            },
            None,
            20,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid entity type 'invoice'"));
    }
}
