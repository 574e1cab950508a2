use rd_core::entities::{
    AuditEntry, Company, CompanyAssignment, EvaluationReport, Project, SubProject, Task,
    TaskDateOverride,
};
use rd_core::events::WorkflowEvent;
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_json(&args.entity)?, flags.format)
}

fn schema_json(entity: &str) -> anyhow::Result<serde_json::Value> {
    let schema = match entity.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "project" => schema_for!(Project),
        "sub-project" => schema_for!(SubProject),
        "task" => schema_for!(Task),
        "company" => schema_for!(Company),
        "assignment" => schema_for!(CompanyAssignment),
        "task-dates" | "task-date-override" => schema_for!(TaskDateOverride),
        "report" | "evaluation-report" => schema_for!(EvaluationReport),
        "audit-entry" | "audit" => schema_for!(AuditEntry),
        "event" | "workflow-event" => schema_for!(WorkflowEvent),
        other => anyhow::bail!("unknown entity '{other}'"),
    };
    Ok(serde_json::to_value(schema)?)
}

#[cfg(test)]
mod tests {
    use super::schema_json;

    #[test]
    fn report_schema_lists_flattened_ratings() {
        let schema = schema_json("evaluation_report").unwrap().to_string();
        assert!(schema.contains("overall_rating"));
        assert!(schema.contains("strengths"));
    }

    #[test]
    fn unknown_entity_is_an_error() {
        let err = schema_json("invoice").unwrap_err();
        assert!(err.to_string().contains("unknown entity 'invoice'"));
    }
}
