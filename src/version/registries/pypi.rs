//! PyPI registry client for resolving Python package releases

use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use reqwest::{Client, StatusCode, redirect};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{DEFAULT_INDEX_URL, FETCH_TIMEOUT_MS};
use crate::parser::requirement::Requirement;
use crate::version::error::RegistryError;
use crate::version::loose::Version;
use crate::version::registry::Registry;
use crate::version::resolver::resolve_latest;
use crate::version::types::ReleaseInfo;

const UPLOAD_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// PyPI registry client
pub struct PypiRegistry {
    client: Client,
    /// Used to probe for renamed packages without following the redirect
    probe_client: Client,
    base_url: String,
}

impl Default for PypiRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_URL.to_string())
    }
}

impl PypiRegistry {
    pub fn new(base_url: String) -> Self {
        Self::with_timeout(base_url, Duration::from_millis(FETCH_TIMEOUT_MS))
    }

    pub fn with_timeout(base_url: String, timeout: Duration) -> Self {
        let user_agent = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
        Self {
            client: Client::builder()
                .user_agent(user_agent)
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            probe_client: Client::builder()
                .user_agent(user_agent)
                .timeout(timeout)
                .redirect(redirect::Policy::none())
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn package_url(&self, requirement: &Requirement) -> String {
        if requirement.is_pinned() {
            format!(
                "{}/pypi/{}/{}/json",
                self.base_url, requirement.package, requirement.version
            )
        } else {
            format!("{}/pypi/{}/json", self.base_url, requirement.package)
        }
    }

    async fn fetch_package(&self, requirement: &Requirement) -> Result<PypiResponse, RegistryError> {
        let url = self.package_url(requirement);
        debug!("Fetching PyPI package: {}", url);

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return self.fetch_renamed_package(requirement).await;
        }

        parse_response(response).await
    }

    /// PyPI answers 404 for some non-canonical names while the project page
    /// redirects to the canonical one. Follow that redirect once.
    async fn fetch_renamed_package(
        &self,
        requirement: &Requirement,
    ) -> Result<PypiResponse, RegistryError> {
        let root_url = format!("{}/pypi/{}", self.base_url, requirement.package);
        let response = self.probe_client.head(&root_url).send().await?;

        if response.status() != StatusCode::MOVED_PERMANENTLY {
            return Err(RegistryError::NotFound(requirement.package.clone()));
        }

        let Some(location) = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
        else {
            return Err(RegistryError::NotFound(requirement.package.clone()));
        };

        let location = location.trim_end_matches('/');
        let new_url = if location.starts_with('/') {
            format!("{}{}/json", self.base_url, location)
        } else {
            format!("{}/json", location)
        };
        debug!(
            "Package {} moved, fetching {}",
            requirement.package, new_url
        );

        let response = self.client.get(&new_url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(requirement.package.clone()));
        }

        parse_response(response).await
    }
}

async fn parse_response(response: reqwest::Response) -> Result<PypiResponse, RegistryError> {
    if !response.status().is_success() {
        return Err(RegistryError::InvalidResponse(format!(
            "PyPI API returned status {}",
            response.status()
        )));
    }

    response
        .json()
        .await
        .map_err(|e| RegistryError::InvalidResponse(e.to_string()))
}

/// PyPI JSON API response structure
#[derive(Debug, Deserialize)]
struct PypiResponse {
    info: PypiInfo,
    /// Keyed by version, kept in the order PyPI lists them
    #[serde(default)]
    releases: IndexMap<String, Vec<PypiFile>>,
    /// Files of the requested version (version-specific endpoint)
    #[serde(default)]
    urls: Vec<PypiFile>,
}

/// Package information from PyPI
#[derive(Debug, Deserialize)]
struct PypiInfo {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    stable_version: Option<String>,
}

/// A distribution file of a release
#[derive(Debug, Deserialize)]
struct PypiFile {
    #[serde(default)]
    upload_time: Option<String>,
}

impl PypiResponse {
    fn resolve_version(&self, requirement: &Requirement) -> Option<Version> {
        if requirement.is_pinned() {
            return Some(Version::parse(&requirement.version));
        }

        resolve_latest(
            self.info.stable_version.as_deref(),
            self.releases.keys().map(String::as_str),
        )
    }

    /// Upload date of the first file of `version`, if PyPI has one
    fn release_date(&self, version: &Version) -> Option<NaiveDate> {
        let first_file = match self.releases.get(version.as_str()) {
            Some(files) => files.first(),
            None => self.urls.first(),
        };
        let upload_time = first_file.and_then(|file| file.upload_time.as_deref());

        let Some(upload_time) = upload_time else {
            warn!(
                "Failed to extract release date for version: {} {}. No upload time available.",
                self.info.name.as_deref().unwrap_or_default(),
                version
            );
            return None;
        };

        NaiveDateTime::parse_from_str(upload_time, UPLOAD_TIME_FORMAT)
            .map(|datetime| datetime.date())
            .inspect_err(|e| warn!("Failed to parse upload time '{}': {}", upload_time, e))
            .ok()
    }
}

#[async_trait]
impl Registry for PypiRegistry {
    async fn fetch_release(&self, requirement: &Requirement) -> Result<ReleaseInfo, RegistryError> {
        let pypi_response = self.fetch_package(requirement).await?;

        let version = pypi_response.resolve_version(requirement).ok_or_else(|| {
            RegistryError::InvalidResponse(format!(
                "No releases published for {}",
                requirement.package
            ))
        })?;
        let release_date = pypi_response.release_date(&version);

        debug!(
            "Resolved {} to {} (released {:?})",
            requirement.package, version, release_date
        );

        Ok(ReleaseInfo::new(version, release_date))
    }
}
