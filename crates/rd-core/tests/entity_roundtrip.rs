//! Serde roundtrip and JsonSchema validation for the persisted entities.

use chrono::{NaiveDate, Utc};
use schemars::schema_for;
use rd_core::entities::*;
use rd_core::enums::*;
use rd_core::events::WorkflowEvent;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

roundtrip_and_validate!(
    sub_project_roundtrip,
    SubProject,
    SubProject {
        id: "spj-a3f8b2c1".into(),
        project_id: "prj-00000001".into(),
        name: "Market entry: Germany".into(),
        description: None,
        status: DeliveryStatus::Active,
        progress: 50,
        start_date: Some(date(2024, 1, 1)),
        end_date: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    task_roundtrip,
    Task,
    Task {
        id: "tsk-a3f8b2c1".into(),
        sub_project_id: "spj-a3f8b2c1".into(),
        title: "Export pricing review".into(),
        description: Some("Landed cost model per incoterm".into()),
        priority: TaskPriority::High,
        status: TaskStatus::InReview,
        due_date: Some(date(2024, 3, 31)),
        progress: 50,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    inverted_override_roundtrip,
    TaskDateOverride,
    TaskDateOverride {
        task_id: "tsk-a3f8b2c1".into(),
        company_id: "cmp-0000000a".into(),
        start_date: Some(date(2024, 1, 10)),
        end_date: Some(date(2024, 1, 5)),
        updated_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    report_roundtrip,
    EvaluationReport,
    EvaluationReport {
        id: "evr-a3f8b2c1".into(),
        sub_project_id: "spj-a3f8b2c1".into(),
        company_id: "cmp-0000000a".into(),
        scores: ReportScores {
            overall_rating: 5,
            quality_rating: 4,
            timeliness_rating: 3,
            communication_rating: 5,
        },
        texts: ReportTexts {
            strengths: Some("Clear export plan".into()),
            ..ReportTexts::default()
        },
        created_by: "usr-consultant".into(),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    event_roundtrip,
    WorkflowEvent,
    WorkflowEvent::TaskTransitioned {
        task_id: "tsk-a3f8b2c1".into(),
        sub_project_id: "spj-a3f8b2c1".into(),
        from: TaskStatus::InReview,
        to: TaskStatus::Completed,
        actor_id: "usr-admin".into(),
        at: Utc::now(),
    }
);

#[test]
fn report_scores_are_flattened() {
    let report = EvaluationReport {
        id: "evr-1".into(),
        sub_project_id: "spj-1".into(),
        company_id: "cmp-1".into(),
        scores: ReportScores {
            overall_rating: 5,
            quality_rating: 5,
            timeliness_rating: 5,
            communication_rating: 5,
        },
        texts: ReportTexts::default(),
        created_by: "system".into(),
        created_at: Utc::now(),
    };
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["overall_rating"], 5);
    assert!(json.get("scores").is_none());
}

#[test]
fn inverted_override_is_detected() {
    let o = TaskDateOverride {
        task_id: "tsk-1".into(),
        company_id: "cmp-1".into(),
        start_date: Some(date(2024, 1, 10)),
        end_date: Some(date(2024, 1, 5)),
        updated_at: Utc::now(),
    };
    assert!(o.is_inverted());
    let open_ended = TaskDateOverride {
        end_date: None,
        ..o
    };
    assert!(!open_ended.is_inverted());
}
