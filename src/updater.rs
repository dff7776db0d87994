//! Update pipeline
//!
//! One run per package, strictly sequential:
//!
//! 1. resolve the package descriptor (no I/O for unknown packages)
//! 2. clone the package's AUR repository
//! 3. read the recorded version from `.SRCINFO`
//! 4. look up the latest upstream release
//! 5. stop if both versions match
//! 6. download every release asset and compute its checksum
//! 7. render PKGBUILD and .SRCINFO
//! 8. overwrite and stage both files
//! 9. commit as `Updated to {tag}`
//! 10. push
//!
//! Any error aborts the run. Files already written are not restored; the
//! working copy is discarded with the run.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::config::Config;
use crate::package::{self, PackageDescriptor};
use crate::parser::{self, ParseError};
use crate::render::{Checksums, MetadataRenderer, RenderError};
use crate::vcs::{GitRemote, RemoteRepository, Signature, TransportError};
use crate::version::checksum::{ChecksumFetcher, HttpChecksumFetcher};
use crate::version::error::{FetchError, LookupError};
use crate::version::registries::GitHubReleases;
use crate::version::registry::ReleaseSource;
use crate::version::Version;

pub const PKGBUILD_PATH: &str = "PKGBUILD";
pub const SRCINFO_PATH: &str = ".SRCINFO";

#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Unknown package: {0}")]
    UnknownPackage(String),

    #[error("Upstream lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("Failed to parse .SRCINFO: {0}")]
    Parse(#[from] ParseError),

    #[error("Checksum download failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Rendering failed: {0}")]
    Template(RenderError),

    #[error("Repository operation failed: {0}")]
    Transport(#[from] TransportError),
}

impl From<RenderError> for UpdateError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::UnknownPackage(name) => UpdateError::UnknownPackage(name),
            other => UpdateError::Template(other),
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The recorded version already matches upstream; nothing was changed
    UpToDate { version: Version },
    /// New metadata was committed and pushed
    Published { version: Version, commit: String },
}

/// Commit message for an update to `version`
pub fn commit_message(version: &Version) -> String {
    format!("Updated to {}", version)
}

/// Coordinates release lookup, checksums, rendering and publishing
pub struct Updater {
    releases: Arc<dyn ReleaseSource>,
    checksums: Arc<dyn ChecksumFetcher>,
    repository: Arc<dyn RemoteRepository>,
    renderer: MetadataRenderer,
    author: Signature,
}

impl Updater {
    pub fn new(
        releases: Arc<dyn ReleaseSource>,
        checksums: Arc<dyn ChecksumFetcher>,
        repository: Arc<dyn RemoteRepository>,
        renderer: MetadataRenderer,
        author: Signature,
    ) -> Self {
        Self {
            releases,
            checksums,
            repository,
            renderer,
            author,
        }
    }

    /// Builds an updater talking to GitHub and the AUR as configured
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let mut remote = GitRemote::new(&config.aur.remote_base)
            .with_credentials(config.aur.ssh.clone());
        if let Some(known_hosts) = &config.aur.known_hosts {
            remote = remote.with_known_hosts(known_hosts);
        }

        Ok(Self::new(
            Arc::new(GitHubReleases::new(
                &config.github.api_base_url,
                config.github.token.clone(),
            )?),
            Arc::new(HttpChecksumFetcher::new()?),
            Arc::new(remote),
            MetadataRenderer::new(&config.assets_dir),
            config.author.clone(),
        ))
    }

    /// Brings `package_name` up to date with its latest upstream release
    pub async fn run(&self, package_name: &str) -> Result<UpdateOutcome, UpdateError> {
        let package = package::find(package_name)
            .ok_or_else(|| UpdateError::UnknownPackage(package_name.to_string()))?;

        let mut working_copy = self.repository.checkout(package.name).await?;

        let current = parser::read_version(&working_copy.read_file(SRCINFO_PATH).await?)?;
        let latest = self
            .releases
            .latest_release(package.upstream.owner, package.upstream.repo)
            .await?;

        if current.matches(&latest) {
            info!("{} is up to date ({})", package.name, current);
            return Ok(UpdateOutcome::UpToDate { version: current });
        }

        info!("{} is outdated: {} -> {}", package.name, current, latest);

        let checksums = self.fetch_checksums(package, &latest).await?;
        let rendered = self.renderer.render(package.name, &latest, &checksums)?;

        working_copy
            .write_file(PKGBUILD_PATH, &rendered.pkgbuild)
            .await?;
        working_copy
            .write_file(SRCINFO_PATH, &rendered.srcinfo)
            .await?;
        working_copy.stage(&[PKGBUILD_PATH, SRCINFO_PATH]).await?;

        let commit = working_copy
            .commit(&commit_message(&latest), &self.author)
            .await?;
        working_copy.push().await?;

        info!("Published {} {} ({})", package.name, latest, commit);

        Ok(UpdateOutcome::Published {
            version: latest,
            commit,
        })
    }

    /// Runs every package in order, stopping at the first error
    pub async fn run_all(
        &self,
        package_names: &[&str],
    ) -> Result<Vec<(String, UpdateOutcome)>, UpdateError> {
        let mut outcomes = Vec::with_capacity(package_names.len());
        for name in package_names {
            let outcome = self
                .run(name)
                .await
                .inspect_err(|e| error!("Failed to update {}: {}", name, e))?;
            outcomes.push((name.to_string(), outcome));
        }
        Ok(outcomes)
    }

    async fn fetch_checksums(
        &self,
        package: &PackageDescriptor,
        version: &Version,
    ) -> Result<Checksums, FetchError> {
        let mut checksums = Checksums::new();
        for asset in package.assets {
            let sum = self.checksums.sha256(&asset.url(version)).await?;
            checksums.insert(asset.arch, sum);
        }
        Ok(checksums)
    }
}
