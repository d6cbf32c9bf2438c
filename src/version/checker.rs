//! Staleness evaluation for pinned packages

use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::parser::requirement::Requirement;
use crate::version::types::ReleaseInfo;

/// Everything known about one requirement before it is judged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReleases {
    pub requirement: Requirement,
    /// Latest published release, None if it could not be fetched
    pub latest: Option<ReleaseInfo>,
    /// The pinned release, None if it could not be fetched
    pub current: Option<ReleaseInfo>,
}

/// Outcome of checking a single requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RotVerdict {
    pub package: String,
    pub rotten: bool,
    pub message: RotMessage,
}

/// What was found out about a package, rendered by `Display`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RotMessage {
    UpToDate {
        package: String,
        version: String,
    },
    Ignored {
        package: String,
    },
    CannotFetch {
        package: String,
        version: String,
    },
    /// Outdated, but release dates are missing so the delay is unknown
    NoDelayInfo {
        package: String,
        current_version: String,
        latest_version: String,
    },
    RottenDirectSuccessor {
        package: String,
        current_version: String,
        rotten_days: i64,
        latest_version: String,
    },
    RottenNotDirectSuccessor {
        package: String,
        current_version: String,
        rotten_days: i64,
        latest_version: String,
        days_since_last_release: i64,
    },
}

impl fmt::Display for RotMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotMessage::UpToDate { package, version } => {
                write!(f, "{} ({}) is up to date", package, version)
            }
            RotMessage::Ignored { package } => write!(f, "Ignoring updates for {}.", package),
            RotMessage::CannotFetch { package, version } => write!(
                f,
                "Skipping {} ({}). Cannot fetch info from PyPI",
                package, version
            ),
            RotMessage::NoDelayInfo {
                package,
                current_version,
                latest_version,
            } => write!(
                f,
                "{} ({}) is out of date. No delay info available. Latest version is: {}",
                package, current_version, latest_version
            ),
            RotMessage::RottenDirectSuccessor {
                package,
                current_version,
                rotten_days,
                latest_version,
            } => write!(
                f,
                "{} ({}) is {} days out of date. Latest version is: {}",
                package, current_version, rotten_days, latest_version
            ),
            RotMessage::RottenNotDirectSuccessor {
                package,
                current_version,
                rotten_days,
                latest_version,
                days_since_last_release,
            } => write!(
                f,
                "{} ({}) is {} days out of date. Latest version is: {} ({} days old).",
                package, current_version, rotten_days, latest_version, days_since_last_release
            ),
        }
    }
}

impl RotVerdict {
    fn fresh(message: RotMessage, package: &str) -> Self {
        Self {
            package: package.to_string(),
            rotten: false,
            message,
        }
    }

    fn rotten(message: RotMessage, package: &str) -> Self {
        Self {
            package: package.to_string(),
            rotten: true,
            message,
        }
    }
}

/// Decide whether a package is rotten
///
/// # Arguments
/// * `releases` - The requirement with its current and latest releases
/// * `delay` - How long an update may stay unapplied
/// * `today` - Reference date for release ages
pub fn evaluate(releases: &PackageReleases, delay: Duration, today: NaiveDate) -> RotVerdict {
    let requirement = &releases.requirement;
    let package = requirement.package.as_str();

    if requirement.ignore {
        return RotVerdict::fresh(
            RotMessage::Ignored {
                package: package.to_string(),
            },
            package,
        );
    }

    let (Some(current), Some(latest)) = (&releases.current, &releases.latest) else {
        return RotVerdict::fresh(
            RotMessage::CannotFetch {
                package: package.to_string(),
                version: requirement.version.clone(),
            },
            package,
        );
    };

    let up_to_date = RotMessage::UpToDate {
        package: package.to_string(),
        version: current.version.to_string(),
    };

    if current.version == latest.version {
        return RotVerdict::fresh(up_to_date, package);
    }

    let no_delay_info = || {
        RotVerdict::rotten(
            RotMessage::NoDelayInfo {
                package: package.to_string(),
                current_version: current.version.to_string(),
                latest_version: latest.version.to_string(),
            },
            package,
        )
    };

    if latest.version.is_direct_successor(&current.version) {
        // A small bump only rots once the bump itself has aged
        let Some(latest_date) = latest.release_date else {
            return no_delay_info();
        };

        let rotten_time = today - latest_date;
        if rotten_time > delay {
            return RotVerdict::rotten(
                RotMessage::RottenDirectSuccessor {
                    package: package.to_string(),
                    current_version: current.version.to_string(),
                    rotten_days: rotten_time.num_days(),
                    latest_version: latest.version.to_string(),
                },
                package,
            );
        }
    } else {
        let (Some(current_date), Some(latest_date)) = (current.release_date, latest.release_date)
        else {
            return no_delay_info();
        };

        let rotten_time = latest_date - current_date;
        if rotten_time > delay {
            return RotVerdict::rotten(
                RotMessage::RottenNotDirectSuccessor {
                    package: package.to_string(),
                    current_version: current.version.to_string(),
                    rotten_days: rotten_time.num_days(),
                    latest_version: latest.version.to_string(),
                    days_since_last_release: (today - latest_date).num_days(),
                },
                package,
            );
        }
    }

    RotVerdict::fresh(up_to_date, package)
}
