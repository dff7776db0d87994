//! Release artifact checksums

#[cfg(test)]
use mockall::automock;

use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::version::error::FetchError;

/// Trait for computing the checksum of a downloadable artifact
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ChecksumFetcher: Send + Sync {
    /// Downloads `url` and returns the lower-case hex SHA-256 of its body
    async fn sha256(&self, url: &str) -> Result<String, FetchError>;
}

/// Checksum fetcher that downloads artifacts over HTTP in a single attempt
pub struct HttpChecksumFetcher {
    client: reqwest::Client,
}

impl HttpChecksumFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: reqwest::Client::builder()
                .user_agent("aur-autoupdater")
                .build()?,
        })
    }
}

#[async_trait::async_trait]
impl ChecksumFetcher for HttpChecksumFetcher {
    async fn sha256(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Artifact download returned status {}: {}", status, url);
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let sha256sum = hex::encode(Sha256::digest(&body));

        info!("sha256sum of {} ({} bytes): {}", url, body.len(), sha256sum);

        Ok(sha256sum)
    }
}
