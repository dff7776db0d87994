//! GitHub Releases API release source

use crate::version::error::LookupError;
use crate::version::registry::ReleaseSource;
use crate::version::types::Version;
use serde::Deserialize;
use tracing::{info, warn};

/// Default base URL for GitHub API
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Response from the GitHub latest release endpoint
#[derive(Debug, Deserialize)]
struct Release {
    #[serde(default)]
    tag_name: String,
}

/// Release source backed by the GitHub Releases API
pub struct GitHubReleases {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubReleases {
    /// Creates a new GitHubReleases client
    ///
    /// `token` is sent as a bearer token when present.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: reqwest::Client::builder()
                .user_agent("aur-autoupdater")
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }
}

#[async_trait::async_trait]
impl ReleaseSource for GitHubReleases {
    async fn latest_release(&self, owner: &str, repo: &str) -> Result<Version, LookupError> {
        let url = format!("{}/repos/{}/{}/releases/latest", self.base_url, owner, repo);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(LookupError::Status { status, url });
        }

        let release: Release = response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub release response: {}", e);
            LookupError::InvalidResponse(e.to_string())
        })?;

        if release.tag_name.is_empty() {
            return Err(LookupError::EmptyTag(format!("{}/{}", owner, repo)));
        }

        info!("Latest release of {}/{}: {}", owner, repo, release.tag_name);

        Ok(Version::new(release.tag_name))
    }
}
