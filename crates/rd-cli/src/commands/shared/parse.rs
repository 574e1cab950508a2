use serde::de::DeserializeOwned;

/// Parse a snake_case enum from user input. Hyphens are accepted in place of
/// underscores, so `in-review` and `in_review` both work.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse an optional enum flag.
pub fn parse_optional_enum<T>(raw: Option<&str>, field: &str) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
{
    raw.map(|value| parse_enum(value, field)).transpose()
}

#[cfg(test)]
mod tests {
    use rd_core::enums::{DeliveryStatus, EntityType, TaskPriority, TaskStatus};

    use super::{parse_enum, parse_optional_enum};

    #[test]
    fn parses_snake_case_status() {
        let status: TaskStatus = parse_enum("completed", "status").unwrap();
        assert_eq!(status, TaskStatus::Completed);
    }

    #[test]
    fn parses_hyphenated_and_uppercase_input() {
        let status: TaskStatus = parse_enum("In-Review", "status").unwrap();
        assert_eq!(status, TaskStatus::InReview);
        let hold: DeliveryStatus = parse_enum("on-hold", "status").unwrap();
        assert_eq!(hold, DeliveryStatus::OnHold);
        let entity: EntityType = parse_enum("sub-project", "entity type").unwrap();
        assert_eq!(entity, EntityType::SubProject);
    }

    #[test]
    fn unknown_value_names_the_field() {
        let err = parse_enum::<TaskPriority>("asap", "priority").unwrap_err();
        assert!(err.to_string().contains("invalid priority 'asap'"));
    }

    #[test]
    fn optional_none_stays_none() {
        let parsed: Option<TaskPriority> = parse_optional_enum(None, "priority").unwrap();
        assert!(parsed.is_none());
    }
}
