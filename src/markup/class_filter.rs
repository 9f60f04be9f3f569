use std::fmt;

/// Class attribute predicate used by [`super::DocumentQuery`]
///
/// Matching is applied both to each class token and to the whole class
/// attribute with whitespace collapsed, so multi-word selectors such as
/// `"green size22"` work as well as single classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassFilter {
    /// Matches any element, with or without a class
    Any,

    /// Matches a class token or the whole class attribute exactly
    Exact(String),

    /// Matches when the prefix is followed by at least one more character
    Prefix(String),
}

impl ClassFilter {
    pub fn exact(class: impl Into<String>) -> Self {
        Self::Exact(class.into())
    }

    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix(prefix.into())
    }

    /// Tests a raw `class` attribute value
    pub fn matches(&self, class_attr: Option<&str>) -> bool {
        let wanted = match self {
            Self::Any => return true,
            Self::Exact(wanted) | Self::Prefix(wanted) => wanted,
        };

        let Some(raw) = class_attr else {
            return false;
        };

        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let mut candidates = std::iter::once(collapsed.as_str()).chain(raw.split_whitespace());

        if matches!(self, Self::Prefix(_)) {
            candidates.any(|candidate| has_continuation(candidate, wanted))
        } else {
            candidates.any(|candidate| candidate == wanted)
        }
    }
}

impl fmt::Display for ClassFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "[*]"),
            Self::Exact(class) => write!(f, "[class=\"{}\"]", class),
            Self::Prefix(prefix) => write!(f, "[class^=\"{}\"]", prefix),
        }
    }
}

/// True if `prefix` occurs in `haystack` with at least one character after it
fn has_continuation(haystack: &str, prefix: &str) -> bool {
    haystack
        .match_indices(prefix)
        .any(|(start, _)| start + prefix.len() < haystack.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_matches_everything() {
        assert!(ClassFilter::Any.matches(None));
        assert!(ClassFilter::Any.matches(Some("whatever")));
    }

    #[test]
    fn test_exact_single_token() {
        let filter = ClassFilter::exact("blue");
        assert!(filter.matches(Some("blue")));
        assert!(filter.matches(Some("size18 blue")));
        assert!(!filter.matches(Some("bluegrey")));
        assert!(!filter.matches(None));
    }

    #[test]
    fn test_exact_multi_word() {
        let filter = ClassFilter::exact("green size22");
        assert!(filter.matches(Some("green size22")));
        assert!(filter.matches(Some("  green   size22 ")));
        assert!(!filter.matches(Some("green size22 bold")));
        assert!(!filter.matches(Some("green")));
    }

    #[test]
    fn test_prefix_requires_continuation() {
        let filter = ClassFilter::prefix("ticket-clear line");
        assert!(filter.matches(Some("ticket-clear line ticket-clear-promo")));
        assert!(!filter.matches(Some("ticket-clear line")));
        assert!(!filter.matches(Some("ticket-clear")));

        let link = ClassFilter::prefix("realtyPhoto");
        assert!(link.matches(Some("realtyPhotoLink")));
        assert!(link.matches(Some("photo-link realtyPhoto-1")));
        assert!(!link.matches(Some("realtyPhoto")));
    }

    #[test]
    fn test_display() {
        assert_eq!(ClassFilter::exact("blue").to_string(), r#"[class="blue"]"#);
        assert_eq!(ClassFilter::prefix("realtyPhoto").to_string(), r#"[class^="realtyPhoto"]"#);
    }
}
