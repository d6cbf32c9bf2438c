//! requirements.txt parser
//!
//! Extracts `==` pins from a manifest and follows `-r other.txt` includes.
//! Includes are resolved against the directory of the file that names
//! them. Every file is read at most once, so include cycles terminate.
//!
//! Format examples:
//! - Pin: `requests==2.31.0`
//! - Ignored pin: `django==3.2.0  # norot`
//! - Include: `-r requirements/base.txt`

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::parser::error::ParseError;
use crate::parser::requirement::{Requirement, remove_comments};

const INCLUDE_PREFIX: &str = "-r ";

/// Parser for a requirements file and everything it includes
pub struct RequirementsParser {
    path: PathBuf,
}

/// Result of scanning a single file, before includes are followed
#[derive(Debug, Default)]
struct ParsedFile {
    requirements: Vec<Requirement>,
    includes: Vec<String>,
}

impl RequirementsParser {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the file, then each included file in the order referenced
    pub fn parse(&self) -> Result<Vec<Requirement>, ParseError> {
        let mut visited = HashSet::new();
        let mut requirements = Vec::new();
        parse_recursive(&self.path, &mut visited, &mut requirements)?;
        Ok(requirements)
    }
}

fn parse_recursive(
    path: &Path,
    visited: &mut HashSet<PathBuf>,
    requirements: &mut Vec<Requirement>,
) -> Result<(), ParseError> {
    let canonical = fs::canonicalize(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if !visited.insert(canonical) {
        debug!("Skipping already parsed requirements file {:?}", path);
        return Ok(());
    }

    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = parse_content(&content);
    requirements.extend(parsed.requirements);

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    for include in parsed.includes {
        parse_recursive(&base_dir.join(include), visited, requirements)?;
    }

    Ok(())
}

fn parse_content(content: &str) -> ParsedFile {
    let mut parsed = ParsedFile::default();

    for line in content.lines() {
        match Requirement::from_line(line) {
            Ok(requirement) => parsed.requirements.push(requirement),
            Err(_) if line.starts_with(INCLUDE_PREFIX) => {
                let target = remove_comments(&line[INCLUDE_PREFIX.len()..]);
                if !target.is_empty() {
                    parsed.includes.push(target.to_string());
                }
            }
            Err(e) => debug!("{}", e),
        }
    }

    parsed
}
