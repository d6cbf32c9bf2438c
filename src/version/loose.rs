//! Lenient version parsing and comparison
//!
//! PyPI version strings are not guaranteed to follow any scheme, so a
//! version is reduced to its numeric parts: `-` is treated like `.`,
//! every segment loses its non-digit characters, and empty segments
//! count as `0`. Parsing never fails.

use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

static PRERELEASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(a|b|c|rc|alpha|beta|pre|preview|dev|svn|git)").expect("valid pre-release regex")
});

/// A version reduced to its numeric parts, keeping the original text
#[derive(Debug, Clone)]
pub struct Version {
    version: String,
    parts: Vec<u64>,
}

impl Version {
    pub fn parse(version: &str) -> Self {
        let parts = version
            .trim()
            .replace('-', ".")
            .split('.')
            .map(|segment| {
                let digits: String = segment.chars().filter(char::is_ascii_digit).collect();
                digits.parse().unwrap_or(0)
            })
            .collect();

        Self {
            version: version.to_string(),
            parts,
        }
    }

    /// The version string as it was written
    pub fn as_str(&self) -> &str {
        &self.version
    }

    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    /// True if the string contains a pre-release marker anywhere
    pub fn is_prerelease(&self) -> bool {
        PRERELEASE_RE.is_match(&self.version)
    }

    /// Compare two versions.
    ///
    /// Identical strings are equal. Otherwise a pre-release always wins:
    /// if `self` is a pre-release it is greater, else if `other` is one
    /// `self` is less. Only then are the zero-padded parts compared.
    ///
    /// Two distinct pre-releases are each greater than the other, so this
    /// is not a total order and `Version` does not implement `Ord`.
    pub fn compare(&self, other: &Version) -> Ordering {
        if self.version == other.version {
            return Ordering::Equal;
        }

        if self.is_prerelease() {
            return Ordering::Greater;
        }
        if other.is_prerelease() {
            return Ordering::Less;
        }

        let len = self.parts.len().max(other.parts.len());
        let padded = |parts: &[u64], index: usize| parts.get(index).copied().unwrap_or(0);

        (0..len)
            .map(|i| padded(&self.parts, i).cmp(&padded(&other.parts, i)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    pub fn is_newer_than(&self, other: &Version) -> bool {
        self.compare(other) == Ordering::Greater
    }

    /// Check whether `self` is at most one step ahead of `previous` in
    /// every segment.
    ///
    /// Versions with a different number of segments are never direct
    /// successors of each other.
    pub fn is_direct_successor(&self, previous: &Version) -> bool {
        if self.parts.len() != previous.parts.len() {
            return false;
        }

        self.parts
            .iter()
            .zip(&previous.parts)
            .all(|(&ours, &theirs)| i128::from(ours) - i128::from(theirs) <= 1)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.version)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.0.0", vec![1, 0, 0])]
    #[case("1-0-0", vec![1, 0, 0])]
    #[case("2.31.0", vec![2, 31, 0])]
    #[case("1.0.0a1", vec![1, 0, 1])]
    #[case("5.0rc2", vec![5, 2])]
    #[case("1..2", vec![1, 0, 2])]
    #[case(" 3.4 ", vec![3, 4])]
    #[case("", vec![0])]
    #[case("99999999999999999999999.1", vec![0, 1])]
    fn parse_extracts_numeric_parts(#[case] input: &str, #[case] expected: Vec<u64>) {
        assert_eq!(Version::parse(input).parts(), expected.as_slice());
    }

    #[test]
    fn parse_keeps_original_string() {
        let version = Version::parse("1-0-0");
        assert_eq!(version.as_str(), "1-0-0");
        assert_eq!(version.to_string(), "1-0-0");
    }

    #[rstest]
    #[case("1.0.0", "1.0.0")]
    #[case("1.0.0", "1-0-0")]
    #[case("1.0", "1.0.0")]
    #[case("2.0.0b1", "2.0.0b1")]
    fn versions_are_equal(#[case] left: &str, #[case] right: &str) {
        assert_eq!(Version::parse(left), Version::parse(right));
        assert_eq!(Version::parse(right), Version::parse(left));
    }

    #[rstest]
    #[case("0.1.0", "1.0.0", Ordering::Less)]
    #[case("1.0.0", "0.1.0", Ordering::Greater)]
    #[case("1.0.1", "1.0", Ordering::Greater)]
    #[case("1.0", "1.0.1", Ordering::Less)]
    #[case("1.10.0", "1.9.0", Ordering::Greater)]
    #[case("1.0.0a", "0.9.0", Ordering::Greater)]
    #[case("0.9.0", "1.0.0a", Ordering::Less)]
    #[case("2.0.0", "2.0.0rc1", Ordering::Less)]
    #[case("2.0.0rc1", "2.0.0", Ordering::Greater)]
    fn compare_returns_expected(
        #[case] left: &str,
        #[case] right: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(
            Version::parse(left).compare(&Version::parse(right)),
            expected
        );
    }

    #[test]
    fn distinct_prereleases_are_each_greater_than_the_other() {
        let alpha = Version::parse("1.0a1");
        let beta = Version::parse("1.0b1");

        assert!(alpha.is_newer_than(&beta));
        assert!(beta.is_newer_than(&alpha));
        assert_ne!(alpha, beta);
    }

    #[test]
    fn compare_does_not_pad_stored_parts() {
        let short = Version::parse("1.0");
        let long = Version::parse("1.0.1");

        assert!(long.is_newer_than(&short));
        assert_eq!(short.parts(), &[1, 0]);
    }

    #[rstest]
    #[case("1.0.0a", true)]
    #[case("1.0b2", true)]
    #[case("2.0rc1", true)]
    #[case("3.0.dev4", true)]
    #[case("1.0.0-preview", true)]
    #[case("1.0.0", false)]
    #[case("2024.1.15", false)]
    #[case("1.0.0RC1", false)]
    fn is_prerelease_detects_markers(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(Version::parse(input).is_prerelease(), expected);
    }

    #[rstest]
    #[case("1.0.1", "1.0.0", true)]
    #[case("1.1.1", "1.0.0", true)]
    #[case("2.0.0", "1.0.0", true)]
    #[case("1.0.0", "1.0.0", true)]
    #[case("1-0-1", "1.0.0", true)]
    #[case("2.31.0", "1.1.0", false)]
    #[case("1.0.2", "1.0.0", false)]
    #[case("1.0.1", "1.0", false)]
    #[case("1.0", "1.0.0", false)]
    fn is_direct_successor_returns_expected(
        #[case] later: &str,
        #[case] earlier: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(
            Version::parse(later).is_direct_successor(&Version::parse(earlier)),
            expected
        );
    }

    #[test]
    fn serializes_as_original_string() {
        let json = serde_json::to_string(&Version::parse("1-2-3")).unwrap();
        assert_eq!(json, r#""1-2-3""#);
    }
}
