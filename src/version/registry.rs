//! Release source trait for looking up the latest upstream version

#[cfg(test)]
use mockall::automock;

use crate::version::error::LookupError;
use crate::version::types::Version;

/// Trait for looking up the latest published release of an upstream project
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetches the tag of the latest release of `owner/repo`
    ///
    /// # Returns
    /// * `Ok(Version)` - The release tag as published (e.g. "v0.8.2")
    /// * `Err(LookupError)` - If the request fails or the tag is empty
    async fn latest_release(&self, owner: &str, repo: &str) -> Result<Version, LookupError>;
}
