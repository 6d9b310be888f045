//! Pluggable text-matching strategy.
//!
//! The relevance scorer and predicate evaluation go through [`TextMatcher`]
//! so the matching backend can be swapped (e.g. for an inverted-index
//! service) without touching the weighting contract in
//! [`crate::query::relevance`].

/// Case-insensitive text matching over product fields.
///
/// Implementations must be deterministic: the same `(haystack, needle)` pair
/// always produces the same answer, regardless of call order.
pub trait TextMatcher: Send + Sync {
    /// Does `haystack` contain `needle`?
    fn is_match(&self, haystack: &str, needle: &str) -> bool {
        self.find(haystack, needle).is_some()
    }

    /// Byte index of the first occurrence of `needle` within the lowercased
    /// `haystack`, or `None`.
    fn find(&self, haystack: &str, needle: &str) -> Option<usize>;

    fn starts_with(&self, haystack: &str, needle: &str) -> bool {
        self.find(haystack, needle) == Some(0)
    }
}

/// The default strategy: plain case-insensitive substring matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl TextMatcher for SubstringMatcher {
    fn find(&self, haystack: &str, needle: &str) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        haystack.to_lowercase().find(&needle.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_is_case_insensitive() {
        let m = SubstringMatcher;
        assert!(m.is_match("Nike Air Max", "nike"));
        assert!(m.is_match("nike air max", "AIR"));
        assert!(!m.is_match("Adidas Ultraboost", "nike"));
    }

    #[test]
    fn find_reports_position_in_lowercased_haystack() {
        let m = SubstringMatcher;
        assert_eq!(m.find("Nike Air Max", "air"), Some(5));
        assert!(m.starts_with("Nike Air Max", "NIKE"));
        assert!(!m.starts_with("Air Max by Nike", "nike"));
    }

    #[test]
    fn empty_needle_never_matches() {
        let m = SubstringMatcher;
        assert_eq!(m.find("anything", ""), None);
    }
}
