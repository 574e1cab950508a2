//! ID prefix constants.
//!
//! Every entity ID is `{prefix}-{8 hex chars}`, e.g. `tsk-a3f8b2c1`. The random
//! part is produced by the store (`randomblob(4)`); this module only owns the
//! prefixes so that callers can recognise an ID's entity type at a glance.

pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_SUB_PROJECT: &str = "spj";
pub const PREFIX_TASK: &str = "tsk";
pub const PREFIX_COMPANY: &str = "cmp";
pub const PREFIX_REPORT: &str = "evr";
pub const PREFIX_AUDIT: &str = "aud";

/// All prefixes, in hierarchy order.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_PROJECT,
    PREFIX_SUB_PROJECT,
    PREFIX_TASK,
    PREFIX_COMPANY,
    PREFIX_REPORT,
    PREFIX_AUDIT,
];

/// Return the prefix portion of an ID, if it has one.
#[must_use]
pub fn prefix_of(id: &str) -> Option<&str> {
    id.split_once('-').map(|(prefix, _)| prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for prefix in ALL_PREFIXES {
            assert!(seen.insert(prefix), "duplicate prefix {prefix}");
        }
    }

    #[test]
    fn prefix_of_splits_on_first_dash() {
        assert_eq!(prefix_of("tsk-a3f8b2c1"), Some("tsk"));
        assert_eq!(prefix_of("plain"), None);
    }
}
