//! Common types shared by registries and the staleness checker

use chrono::NaiveDate;
use serde::Serialize;

use crate::version::loose::Version;

/// A resolved version together with the date it was published
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseInfo {
    pub version: Version,
    /// Upload date of the release, if the registry reported one
    pub release_date: Option<NaiveDate>,
}

impl ReleaseInfo {
    pub fn new(version: Version, release_date: Option<NaiveDate>) -> Self {
        Self {
            version,
            release_date,
        }
    }
}
