#![allow(dead_code)]

pub mod repository;

use std::path::Path;
use std::sync::Arc;

use aur_autoupdater::render::MetadataRenderer;
use aur_autoupdater::updater::Updater;
use aur_autoupdater::vcs::Signature;
use aur_autoupdater::version::registries::GitHubReleases;

pub use repository::{MemoryRepository, RecordedCommit, StaticChecksums};

pub const AUTHOR_NAME: &str = "aur-autoupdater";
pub const AUTHOR_EMAIL: &str = "aur-autoupdater@example.com";

/// Renderer reading the templates shipped in `assets/`
pub fn shipped_renderer() -> MetadataRenderer {
    MetadataRenderer::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"))
}

pub fn author() -> Signature {
    Signature::new(AUTHOR_NAME, AUTHOR_EMAIL)
}

/// Updater talking to a GitHub API mock at `api_url`
pub fn create_test_updater(
    api_url: &str,
    checksums: StaticChecksums,
    repository: MemoryRepository,
) -> Updater {
    Updater::new(
        Arc::new(GitHubReleases::new(api_url, Some("test-token".to_string())).unwrap()),
        Arc::new(checksums),
        Arc::new(repository),
        shipped_renderer(),
        author(),
    )
}

/// A minimal `.SRCINFO` recording `pkgver`
pub fn srcinfo(package: &str, pkgver: &str) -> String {
    format!("pkgbase = {package}\n\tpkgver = {pkgver}\n\tpkgrel = 1\n\npkgname = {package}\n")
}
