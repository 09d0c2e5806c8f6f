//! Range expression expansion
//!
//! Turns a human-written selection like `"1,3-5,7"` into the list of
//! integers it names. Used for artboard numbers and export scales.
//!
//! Grammar (informal):
//!
//! ```text
//! expr  := term ("," term)*
//! term  := int | int "-" int
//! int   := "-"? digit+
//! ```
//!
//! Terms are expanded left to right and concatenated as-is (no sorting, no
//! dedup). A dash term counts up by one from its first value to its second,
//! inclusive; when the first value is larger the term is empty. Terms that
//! are neither a range nor an integer are dropped.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// Matches the first `<int>-<int>` pair in a term.
///
/// The separator dash must follow at least one digit, so a leading sign
/// (`-6`) is never read as a separator, while `-3--1` splits into `-3` and `-1`.
fn range_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(-?[0-9]+)-(-?[0-9]+)").expect("range pattern is valid"))
}

/// A single parsed term of a range expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeTerm {
    /// A lone integer
    Single(i64),
    /// An inclusive range `start..=end` (empty when `start > end`)
    Span { start: i64, end: i64 },
}

impl RangeTerm {
    /// Parse one comma-separated term.
    ///
    /// Returns `None` when the term is not a valid integer or range.
    pub fn parse(term: &str) -> Option<RangeTerm> {
        let term = term.trim();

        if let Some(caps) = range_pattern().captures(term) {
            let start = caps[1].parse::<i64>().ok()?;
            let end = caps[2].parse::<i64>().ok()?;
            return Some(RangeTerm::Span { start, end });
        }

        term.parse::<i64>().ok().map(RangeTerm::Single)
    }

    /// Append the integers this term names to `out`.
    pub fn expand_into(&self, out: &mut Vec<i64>) {
        match *self {
            RangeTerm::Single(n) => out.push(n),
            RangeTerm::Span { start, end } => out.extend(start..=end),
        }
    }
}

/// Expand a range expression into the integers it names.
///
/// ```
/// use backabit::range::expand_range;
///
/// assert_eq!(expand_range("1,3-5,7"), vec![1, 3, 4, 5, 7]);
/// assert_eq!(expand_range("-6,-3--1"), vec![-6, -3, -2, -1]);
/// assert!(expand_range("5-3").is_empty());
/// ```
pub fn expand_range(expr: &str) -> Vec<i64> {
    let mut result = Vec::new();

    for term in expr.split(',') {
        match RangeTerm::parse(term) {
            Some(parsed) => parsed.expand_into(&mut result),
            None => {
                if !term.trim().is_empty() {
                    debug!(term, "dropping unparseable range term");
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_list() {
        assert_eq!(expand_range("1,3-5,7"), vec![1, 3, 4, 5, 7]);
    }

    #[test]
    fn test_expand_negative_terms() {
        assert_eq!(
            expand_range("-6,-3--1,3-5,7-11,14,15,17-20"),
            vec![-6, -3, -2, -1, 3, 4, 5, 7, 8, 9, 10, 11, 14, 15, 17, 18, 19, 20]
        );
    }

    #[test]
    fn test_expand_descending_range_is_empty() {
        assert!(expand_range("5-3").is_empty());
        assert_eq!(expand_range("1,5-3,9"), vec![1, 9]);
    }

    #[test]
    fn test_expand_empty_input() {
        assert!(expand_range("").is_empty());
        assert!(expand_range(",,").is_empty());
    }

    #[test]
    fn test_expand_keeps_order_and_duplicates() {
        assert_eq!(expand_range("3,1-2,1"), vec![3, 1, 2, 1]);
    }

    #[test]
    fn test_expand_range_is_found_inside_term() {
        assert_eq!(expand_range("x1-3y"), vec![1, 2, 3]);
    }

    #[test]
    fn test_expand_single_value_range() {
        assert_eq!(expand_range("4-4"), vec![4]);
    }

    #[test]
    fn test_expand_trims_whitespace() {
        assert_eq!(expand_range(" 2 , 3-4 "), vec![2, 3, 4]);
    }

    #[test]
    fn test_expand_skips_garbage_terms() {
        assert_eq!(expand_range("1,abc,2.5,,3"), vec![1, 3]);
    }

    #[test]
    fn test_parse_leading_sign_is_not_a_range() {
        assert_eq!(RangeTerm::parse("-6"), Some(RangeTerm::Single(-6)));
        assert_eq!(RangeTerm::parse("+6"), Some(RangeTerm::Single(6)));
    }

    #[test]
    fn test_parse_negative_span() {
        assert_eq!(RangeTerm::parse("-3--1"), Some(RangeTerm::Span { start: -3, end: -1 }));
        assert_eq!(RangeTerm::parse("-2-2"), Some(RangeTerm::Span { start: -2, end: 2 }));
    }

    #[test]
    fn test_parse_overflowing_value_is_dropped() {
        assert_eq!(RangeTerm::parse("99999999999999999999"), None);
        assert_eq!(RangeTerm::parse("1-99999999999999999999"), None);
    }

    #[test]
    fn test_parse_trailing_dash_is_dropped() {
        assert_eq!(RangeTerm::parse("1-"), None);
        assert!(expand_range("1-,2").eq(&vec![2]));
    }
}
