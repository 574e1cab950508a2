//! Repository modules implementing the workflow operations.
//!
//! Each module adds methods to `RdService` via `impl RdService` blocks.
//! Module-level `fetch_*` helpers take a bare connection and never touch the
//! gate, so mutations can call them from inside their own transaction.

pub mod assignment;
pub mod audit;
pub mod company;
pub mod project;
pub mod report;
pub mod schedule;
pub mod sub_project;
pub mod task;

use rd_core::errors::CoreError;

/// Trim `value` and reject it if nothing is left.
pub(crate) fn require_text(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Normalize optional free text: blank becomes `None`.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(require_text("title", "  Audit  ").unwrap(), "Audit");
        assert!(matches!(
            require_text("title", "   "),
            Err(CoreError::Validation(msg)) if msg == "title must not be empty"
        ));
    }

    #[test]
    fn optional_text_drops_blank() {
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(Some(" x ")).as_deref(), Some("x"));
        assert_eq!(optional_text(None), None);
    }
}
