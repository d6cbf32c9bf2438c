//! Registry test utilities

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use piprot::parser::Requirement;
use piprot::version::Version;
use piprot::version::error::RegistryError;
use piprot::version::registry::Registry;
use piprot::version::types::ReleaseInfo;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Mock registry for testing
///
/// Knows a set of releases per package and the package's latest version.
#[derive(Default)]
pub struct MockRegistry {
    releases: HashMap<String, HashMap<String, Option<NaiveDate>>>,
    latest: HashMap<String, String>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a release; the last registered release of a package is its latest
    pub fn with_release(mut self, package: &str, version: &str, released: Option<NaiveDate>) -> Self {
        self.releases
            .entry(package.to_string())
            .or_default()
            .insert(version.to_string(), released);
        self.latest.insert(package.to_string(), version.to_string());
        self
    }
}

#[async_trait]
impl Registry for MockRegistry {
    async fn fetch_release(&self, requirement: &Requirement) -> Result<ReleaseInfo, RegistryError> {
        let not_found = || RegistryError::NotFound(requirement.package.clone());

        let releases = self.releases.get(&requirement.package).ok_or_else(not_found)?;
        let version = if requirement.is_pinned() {
            requirement.version.clone()
        } else {
            self.latest[&requirement.package].clone()
        };
        let released = releases.get(&version).copied().ok_or_else(not_found)?;

        Ok(ReleaseInfo::new(Version::parse(&version), released))
    }
}
