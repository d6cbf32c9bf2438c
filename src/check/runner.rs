//! Runs the staleness check for every requirement of a manifest

use std::time::Duration;

use chrono::NaiveDate;
use futures::future::join_all;
use tokio::time::sleep;
use tracing::{debug, error};

use crate::config::FETCH_STAGGER_DELAY_MS;
use crate::parser::requirement::Requirement;
use crate::version::checker::{PackageReleases, RotVerdict, evaluate};
use crate::version::registry::Registry;
use crate::version::types::ReleaseInfo;

/// Aggregated verdicts of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSummary {
    /// One verdict per requirement, in manifest order
    pub verdicts: Vec<RotVerdict>,
}

impl CheckSummary {
    pub fn has_rotten(&self) -> bool {
        self.verdicts.iter().any(|verdict| verdict.rotten)
    }

    pub fn rotten_count(&self) -> usize {
        self.verdicts.iter().filter(|verdict| verdict.rotten).count()
    }

    /// Process exit code: 1 if anything rotted, 0 otherwise
    pub fn exit_code(&self) -> u8 {
        u8::from(self.has_rotten())
    }
}

/// Resolve a requirement, logging failures and treating them as unavailable
async fn fetch_release(registry: &dyn Registry, requirement: &Requirement) -> Option<ReleaseInfo> {
    registry
        .fetch_release(requirement)
        .await
        .inspect_err(|e| {
            error!(
                "Couldn't get PyPI info for package: {} {}. Error: {}",
                requirement.package, requirement.version, e
            )
        })
        .ok()
}

/// Fetch the pinned and the latest release of a requirement
///
/// Ignored requirements are not looked up at all.
pub async fn fetch_package_releases(
    registry: &dyn Registry,
    requirement: Requirement,
) -> PackageReleases {
    if requirement.ignore {
        debug!("Not fetching ignored package {}", requirement.package);
        return PackageReleases {
            requirement,
            latest: None,
            current: None,
        };
    }

    let latest_requirement = Requirement::unpinned(requirement.package.clone());
    let (current, latest) = tokio::join!(
        fetch_release(registry, &requirement),
        fetch_release(registry, &latest_requirement),
    );

    PackageReleases {
        requirement,
        latest,
        current,
    }
}

/// Check all requirements against the registry
///
/// Requirements are checked concurrently with staggered start times to
/// avoid rate limiting. Verdicts keep the order of `requirements`.
pub async fn check_requirements(
    registry: &dyn Registry,
    requirements: Vec<Requirement>,
    delay: chrono::Duration,
    today: NaiveDate,
) -> CheckSummary {
    let futures = requirements
        .into_iter()
        .enumerate()
        .map(|(i, requirement)| {
            let stagger = Duration::from_millis(FETCH_STAGGER_DELAY_MS * i as u64);
            async move {
                sleep(stagger).await;
                let releases = fetch_package_releases(registry, requirement).await;
                evaluate(&releases, delay, today)
            }
        });

    let verdicts = join_all(futures).await;

    CheckSummary { verdicts }
}
