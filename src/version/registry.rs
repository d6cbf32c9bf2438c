//! Registry trait for resolving a requirement to a published release

#[cfg(test)]
use mockall::automock;

use crate::parser::requirement::Requirement;
use crate::version::error::RegistryError;
use crate::version::types::ReleaseInfo;

/// Trait for looking up release metadata in a package registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Resolves the release a requirement refers to
    ///
    /// # Arguments
    /// * `requirement` - A pinned requirement, or an unpinned one
    ///   (empty version) to look up the latest release
    ///
    /// # Returns
    /// * `Ok(ReleaseInfo)` - The resolved version and its upload date, if known
    /// * `Err(RegistryError)` - If the lookup fails
    async fn fetch_release(&self, requirement: &Requirement) -> Result<ReleaseInfo, RegistryError>;
}
