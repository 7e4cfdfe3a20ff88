//! Half-open ranges selecting every value that starts with a prefix.
//!
//! A prefix `p` selects exactly the values in `[p, successor(p))`, where
//! `successor` bumps the final code point. Ranges compare by code point,
//! which is also the byte order of UTF-8.

/// Range `[lower, upper)`; `upper` is absent when nothing bounds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixRange {
    lower: String,
    upper: Option<String>,
}

impl PrefixRange {
    /// Range for `prefix`, or `None` when the prefix is empty.
    pub fn for_prefix(prefix: &str) -> Option<Self> {
        if prefix.is_empty() {
            return None;
        }
        Some(Self {
            lower: prefix.to_owned(),
            upper: successor(prefix),
        })
    }

    /// Inclusive lower bound; also the prefix itself.
    pub fn lower(&self) -> &str {
        self.lower.as_str()
    }

    /// Exclusive upper bound.
    pub fn upper(&self) -> Option<&str> {
        self.upper.as_deref()
    }

    /// Whether `value` lies within the range.
    pub fn contains(&self, value: &str) -> bool {
        value >= self.lower() && self.upper().is_none_or(|upper| value < upper)
    }
}

/// Smallest string greater than every string prefixed by `prefix`.
///
/// A trailing `char::MAX` cannot be bumped, so it is dropped and the
/// character before it is bumped instead. Returns `None` for the empty
/// string or a string made only of `char::MAX`.
pub fn successor(prefix: &str) -> Option<String> {
    let mut head = prefix.to_owned();
    while let Some(last) = head.pop() {
        if let Some(next) = next_char(last) {
            head.push(next);
            return Some(head);
        }
    }
    None
}

fn next_char(c: char) -> Option<char> {
    match c {
        char::MAX => None,
        // skip the surrogate block
        '\u{D7FF}' => Some('\u{E000}'),
        _ => char::from_u32(u32::from(c) + 1),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for prefix ranges.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Ann", Some("Ano"))]
    #[case("a", Some("b"))]
    #[case("adz", Some("ad{"))]
    #[case("caf\u{e9}", Some("caf\u{ea}"))]
    #[case("x\u{D7FF}", Some("x\u{E000}"))]
    #[case("ab\u{10FFFF}", Some("ac"))]
    #[case("a\u{10FFFF}\u{10FFFF}", Some("b"))]
    #[case("\u{10FFFF}", None)]
    #[case("", None)]
    fn successor_bumps_the_last_code_point(#[case] prefix: &str, #[case] expected: Option<&str>) {
        assert_eq!(successor(prefix).as_deref(), expected);
    }

    #[rstest]
    fn empty_prefix_has_no_range() {
        assert!(PrefixRange::for_prefix("").is_none());
    }

    #[rstest]
    #[case("Ann", true)]
    #[case("Ann Admin", true)]
    #[case("Ann\u{10FFFF}", true)]
    #[case("Ano", false)]
    #[case("An", false)]
    #[case("Bob", false)]
    fn range_matches_exactly_the_prefixed_values(#[case] value: &str, #[case] inside: bool) {
        let range = PrefixRange::for_prefix("Ann").expect("non-empty prefix");
        assert_eq!(range.contains(value), inside);
        assert_eq!(value.starts_with("Ann"), inside);
    }

    #[rstest]
    fn all_max_prefix_is_unbounded_above() {
        let range = PrefixRange::for_prefix("\u{10FFFF}").expect("non-empty prefix");
        assert_eq!(range.upper(), None);
        assert!(range.contains("\u{10FFFF}\u{10FFFF}"));
        assert!(!range.contains("z"));
    }
}
