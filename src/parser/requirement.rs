//! A single pinned requirement line
//!
//! Format examples:
//! - `requests==2.31.0`
//! - `celery[redis]==5.3.4  # broker`
//! - `django==3.2.0  # norot`

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Match: name[extras]==version, after comments have been removed
static REQUIREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<package>[^\s\[\]]+)(?P<extras>\[\S+\])?==(?P<version>\S+)$")
        .expect("valid requirement regex")
});

/// Match: anything followed by whitespace and a `# norot` / `# no rot` comment
static NOROT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*?\s+#\s*no\s?rot\s*$").expect("valid norot regex"));

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RequirementError {
    /// The line is not an `==` pin (blank, comment, include, range, VCS...)
    #[error("Line: '{0}' does not contain frozen requirement.")]
    NotFrozen(String),
}

/// A package pinned in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    pub package: String,
    /// Pinned version, empty when the latest release should be looked up
    pub version: String,
    /// Set by a trailing `# norot` comment
    pub ignore: bool,
}

impl Requirement {
    pub fn new(package: impl Into<String>, version: impl Into<String>, ignore: bool) -> Self {
        Self {
            package: package.into(),
            version: version.into(),
            ignore,
        }
    }

    /// A requirement asking for the latest release of `package`
    pub fn unpinned(package: impl Into<String>) -> Self {
        Self::new(package, "", false)
    }

    pub fn is_pinned(&self) -> bool {
        !self.version.is_empty()
    }

    pub fn from_line(line: &str) -> Result<Self, RequirementError> {
        let ignore = NOROT_RE.is_match(line);

        let clean_line = remove_comments(line);
        let caps = REQUIREMENT_RE
            .captures(clean_line)
            .ok_or_else(|| RequirementError::NotFrozen(line.to_string()))?;

        Ok(Self::new(&caps["package"], &caps["version"], ignore))
    }
}

/// Drop everything from the first `#` on and trim what is left
pub fn remove_comments(line: &str) -> &str {
    line.split_once('#')
        .map_or(line, |(before, _)| before)
        .trim()
}
