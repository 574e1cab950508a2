/// Pick the list limit: command flag, then global flag, then config default.
/// Zero is treated as unset.
#[must_use]
pub fn effective_limit(local: Option<u32>, global: Option<u32>, fallback: u32) -> u32 {
    local
        .filter(|l| *l > 0)
        .or_else(|| global.filter(|g| *g > 0))
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::effective_limit;

    #[test]
    fn local_wins() {
        assert_eq!(effective_limit(Some(5), Some(10), 20), 5);
    }

    #[test]
    fn global_used_when_local_missing() {
        assert_eq!(effective_limit(None, Some(10), 20), 10);
    }

    #[test]
    fn zero_falls_through_to_default() {
        assert_eq!(effective_limit(Some(0), None, 20), 20);
        assert_eq!(effective_limit(None, Some(0), 20), 20);
    }
}
