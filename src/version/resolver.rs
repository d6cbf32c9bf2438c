//! Latest version resolution
//!
//! PyPI may advertise a stable version explicitly. When it does not, the
//! latest version is the maximum of all published releases, preferring
//! final releases over pre-releases.

use crate::version::loose::Version;

/// Determine the "latest" version of a package
///
/// # Arguments
/// * `stable_version` - The registry's declared stable version, if any
/// * `releases` - All released version strings, in registry order
///
/// # Returns
/// The resolved latest version, or None if nothing was published
pub fn resolve_latest<'a, I>(stable_version: Option<&str>, releases: I) -> Option<Version>
where
    I: IntoIterator<Item = &'a str>,
{
    if let Some(stable) = stable_version.filter(|v| !v.is_empty()) {
        return Some(Version::parse(stable));
    }

    let all_versions: Vec<Version> = releases.into_iter().map(Version::parse).collect();

    let stable_versions = all_versions
        .iter()
        .filter(|v| !v.is_prerelease())
        .cloned()
        .collect::<Vec<_>>();

    if stable_versions.is_empty() {
        find_max(all_versions)
    } else {
        find_max(stable_versions)
    }
}

/// Find the maximum version; a later entry replaces the current maximum
/// only when it compares strictly greater
pub fn find_max(versions: impl IntoIterator<Item = Version>) -> Option<Version> {
    versions.into_iter().fold(None, |max, candidate| match max {
        Some(current) if !candidate.is_newer_than(&current) => Some(current),
        _ => Some(candidate),
    })
}
