//! Glacier lookup by identification code
//!
//! Two modes are supported:
//! - **Exact**: a record matches when its code equals the pattern, including
//!   the code's variant (text vs number).
//! - **Wildcard**: the pattern is read as a string whose ASCII digits pin
//!   character positions; every other character is a placeholder. One or two
//!   pinned positions are supported, e.g. `"??1???"` or `"6?8"`.
//!
//! The engine is total: it never fails for any pattern/collection pair.
//! Patterns pinning zero or more than two positions produce no matches and a
//! warning; records whose code is too short for a pinned position are skipped.

use crate::app::models::{CodePattern, CodedRecord};
use crate::constants::MAX_WILDCARD_DIGITS;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

static DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]").expect("digit class is a valid regex"));

/// How a wildcard pattern will be compared against codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildcardPlan {
    /// Compare one pinned position
    Single(usize),
    /// Compare two pinned positions, both must agree
    Pair(usize, usize),
    /// Too few or too many pinned positions; nothing matches
    Unsupported { digits: usize },
}

impl WildcardPlan {
    /// Interpret a wildcard pattern
    pub fn from_pattern(pattern: &str) -> Self {
        match digit_positions(pattern).as_slice() {
            &[i] => Self::Single(i),
            &[i, j] => Self::Pair(i, j),
            positions => Self::Unsupported {
                digits: positions.len(),
            },
        }
    }

    /// Whether `code` agrees with `pattern` on every pinned position
    ///
    /// Positions count characters, not bytes, so multi-byte placeholders do
    /// not shift the pinned digits.
    fn matches(&self, code: &str, pattern: &str) -> bool {
        let code: Vec<char> = code.chars().collect();
        let pattern: Vec<char> = pattern.chars().collect();
        let agrees = |i: usize| code.get(i).is_some_and(|c| Some(c) == pattern.get(i));

        match *self {
            Self::Single(i) => agrees(i),
            Self::Pair(i, j) => agrees(i) && agrees(j),
            Self::Unsupported { .. } => false,
        }
    }
}

/// 0-indexed character positions of the ASCII digits in `pattern`, left to right
pub fn digit_positions(pattern: &str) -> Vec<usize> {
    DIGIT
        .find_iter(pattern)
        .map(|m| pattern[..m.start()].chars().count())
        .collect()
}

/// Find the names of records whose code matches `pattern`
///
/// With `full_code` the record code must equal the pattern exactly. Without
/// it the pattern is treated as a wildcard (see the module docs). Names are
/// returned in the collection's iteration order; the collection is only read.
///
/// The number of matches is reported as an `info` event instead of printed,
/// so callers can silence it through their log filter.
///
/// # Examples
/// ```
/// use glacier_analysis::{CodePattern, Glacier, GlacierCollection, search_by_code};
///
/// let mut glaciers = GlacierCollection::new();
/// glaciers.insert(Glacier::new("1", "A", "CH", 46.0, 8.0, "E1a001").unwrap()).unwrap();
/// glaciers.insert(Glacier::new("2", "B", "CH", 46.1, 8.1, "E1a002").unwrap()).unwrap();
///
/// assert_eq!(search_by_code(&glaciers, &CodePattern::from("E1a001"), true), vec!["A"]);
/// assert_eq!(search_by_code(&glaciers, &CodePattern::from("?????2"), false), vec!["B"]);
/// ```
pub fn search_by_code<'a, C, R>(collection: C, pattern: &CodePattern, full_code: bool) -> Vec<&'a str>
where
    C: IntoIterator<Item = &'a R>,
    R: CodedRecord + 'a,
{
    let names: Vec<&'a str> = if full_code {
        let wanted = pattern.as_code();
        collection
            .into_iter()
            .filter(|record| record.code() == wanted)
            .map(|record| record.name())
            .collect()
    } else {
        let pattern = pattern.to_string();
        let plan = WildcardPlan::from_pattern(&pattern);

        if let WildcardPlan::Unsupported { digits } = plan {
            warn!(
                "Unsupported wildcard pattern '{}': {} digit positions found, expected 1 to {}",
                pattern, digits, MAX_WILDCARD_DIGITS
            );
            Vec::new()
        } else {
            collection
                .into_iter()
                .filter(|record| {
                    let code = record.code().to_string();
                    let hit = plan.matches(&code, &pattern);
                    if hit {
                        debug!("Code {} matches pattern {}", code, pattern);
                    }
                    hit
                })
                .map(|record| record.name())
                .collect()
        }
    };

    info!("Number of matching glaciers: {}", names.len());
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{Glacier, GlacierCode, GlacierCollection};

    fn collection_of(entries: &[(&str, GlacierCode)]) -> GlacierCollection {
        let mut collection = GlacierCollection::new();
        for (i, (name, code)) in entries.iter().enumerate() {
            let glacier = Glacier::new(
                format!("{:05}", i + 1),
                *name,
                "CH",
                46.0,
                8.0,
                code.clone(),
            )
            .unwrap();
            collection.insert(glacier).unwrap();
        }
        collection
    }

    fn text(code: &str) -> GlacierCode {
        GlacierCode::Text(code.to_string())
    }

    #[test]
    fn test_exact_match() {
        let collection = collection_of(&[("A", text("E1a001")), ("B", text("E1a002"))]);

        let names = search_by_code(&collection, &CodePattern::from("E1a001"), true);
        assert_eq!(names, vec!["A"]);

        let names = search_by_code(&collection, &CodePattern::from("E1a003"), true);
        assert!(names.is_empty());
    }

    #[test]
    fn test_exact_match_is_variant_sensitive() {
        let collection = collection_of(&[
            ("NUMERIC", GlacierCode::Number(638)),
            ("TEXTUAL", text("638")),
        ]);

        let names = search_by_code(&collection, &CodePattern::from(638_i64), true);
        assert_eq!(names, vec!["NUMERIC"]);

        let names = search_by_code(&collection, &CodePattern::from("638"), true);
        assert_eq!(names, vec!["TEXTUAL"]);
    }

    #[test]
    fn test_exact_match_returns_duplicates_in_order() {
        let collection = collection_of(&[
            ("FIRST", GlacierCode::Number(521)),
            ("OTHER", GlacierCode::Number(638)),
            ("SECOND", GlacierCode::Number(521)),
        ]);

        let names = search_by_code(&collection, &CodePattern::from(521_i64), true);
        assert_eq!(names, vec!["FIRST", "SECOND"]);
    }

    #[test]
    fn test_single_digit_wildcard() {
        let collection = collection_of(&[("ONE", text("ab1xyz")), ("TWO", text("ab2xyz"))]);

        let names = search_by_code(&collection, &CodePattern::from("??1???"), false);
        assert_eq!(names, vec!["ONE"]);
    }

    #[test]
    fn test_two_digit_wildcard_requires_both_positions() {
        let collection = collection_of(&[
            ("BOTH", GlacierCode::Number(638)),
            ("FIRST_ONLY", GlacierCode::Number(631)),
            ("LAST_ONLY", GlacierCode::Number(528)),
            ("ALSO_BOTH", GlacierCode::Number(658)),
        ]);

        let names = search_by_code(&collection, &CodePattern::from("6?8"), false);
        assert_eq!(names, vec!["BOTH", "ALSO_BOTH"]);
    }

    #[test]
    fn test_wildcard_renders_numeric_codes_as_strings() {
        let collection = collection_of(&[
            ("NUMERIC", GlacierCode::Number(534)),
            ("TEXTUAL", text("034")),
        ]);

        // Pattern pins position 2 to '4'; both render to strings ending in '4'
        let names = search_by_code(&collection, &CodePattern::from("??4"), false);
        assert_eq!(names, vec!["NUMERIC", "TEXTUAL"]);

        // A numeric pattern is read as its digits in wildcard mode: "53" pins two
        let names = search_by_code(&collection, &CodePattern::from(53_i64), false);
        assert_eq!(names, vec!["NUMERIC"]);
    }

    #[test]
    fn test_unsupported_digit_counts_yield_nothing() {
        let collection = collection_of(&[("A", text("E1a001")), ("B", GlacierCode::Number(638))]);

        assert!(search_by_code(&collection, &CodePattern::from("E?a???"), false).is_empty());
        assert!(search_by_code(&collection, &CodePattern::from("638"), false).is_empty());
        assert!(search_by_code(&collection, &CodePattern::from("E1a001"), false).is_empty());
    }

    #[test]
    fn test_short_codes_are_skipped() {
        let collection = collection_of(&[
            ("SHORT", GlacierCode::Number(5)),
            ("LONG", GlacierCode::Number(12345)),
        ]);

        let names = search_by_code(&collection, &CodePattern::from("????5"), false);
        assert_eq!(names, vec!["LONG"]);
    }

    #[test]
    fn test_wildcard_positions_count_characters() {
        let collection = collection_of(&[("X", text("x1")), ("Y", text("é2"))]);

        let names = search_by_code(&collection, &CodePattern::from("é1"), false);
        assert_eq!(names, vec!["X"]);

        // Multi-byte character on the code side
        let names = search_by_code(&collection, &CodePattern::from("?2"), false);
        assert_eq!(names, vec!["Y"]);

        assert_eq!(digit_positions("éé1"), vec![2]);
        assert_eq!(WildcardPlan::from_pattern("é1?8"), WildcardPlan::Pair(1, 3));
    }

    #[test]
    fn test_search_does_not_mutate_collection() {
        let collection = collection_of(&[
            ("A", text("E1a001")),
            ("B", text("E1a002")),
            ("C", GlacierCode::Number(638)),
        ]);
        let before: Vec<Glacier> = collection.iter().cloned().collect();

        let _ = search_by_code(&collection, &CodePattern::from("E1a001"), true);
        let _ = search_by_code(&collection, &CodePattern::from("?????2"), false);
        let _ = search_by_code(&collection, &CodePattern::from("6?8"), false);
        let _ = search_by_code(&collection, &CodePattern::from("nothing"), false);

        let after: Vec<Glacier> = collection.iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_search_over_plain_slices() {
        let glaciers = vec![
            Glacier::new("1", "X", "NO", 61.0, 7.0, 638_i64).unwrap(),
            Glacier::new("2", "Y", "NO", 61.5, 7.5, 538_i64).unwrap(),
        ];

        let names = search_by_code(&glaciers, &CodePattern::from("?3?"), false);
        assert_eq!(names, vec!["X", "Y"]);
    }

    #[test]
    fn test_wildcard_plan() {
        assert_eq!(WildcardPlan::from_pattern("??1???"), WildcardPlan::Single(2));
        assert_eq!(WildcardPlan::from_pattern("6?8"), WildcardPlan::Pair(0, 2));
        assert_eq!(
            WildcardPlan::from_pattern("abc"),
            WildcardPlan::Unsupported { digits: 0 }
        );
        assert_eq!(
            WildcardPlan::from_pattern("1234"),
            WildcardPlan::Unsupported { digits: 4 }
        );
        assert_eq!(digit_positions("E1a0?1"), vec![1, 3, 5]);
    }
}
