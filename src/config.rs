use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::vcs::git::DEFAULT_REMOTE_BASE;
use crate::vcs::{Signature, SshCredentials};
use crate::version::registries::github::DEFAULT_BASE_URL;

/// Default directory holding the PKGBUILD / .SRCINFO templates
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Default commit author, the maintainer named in the shipped PKGBUILDs
pub const DEFAULT_AUTHOR_NAME: &str = "Nilesh";
pub const DEFAULT_AUTHOR_EMAIL: &str = "njkevlani@gmail.com";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),
}

/// Runtime configuration, read once at startup and passed to each collaborator
#[derive(Debug, Clone)]
pub struct Config {
    pub github: GitHubConfig,
    pub aur: AurConfig,
    pub assets_dir: PathBuf,
    pub author: Signature,
}

/// GitHub release API settings
#[derive(Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    pub api_base_url: String,
    pub token: Option<String>,
}

impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("api_base_url", &self.api_base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// AUR git repository settings
#[derive(Debug, Clone)]
pub struct AurConfig {
    pub remote_base: String,
    pub ssh: SshCredentials,
    /// known_hosts file; host key verification is disabled when unset
    pub known_hosts: Option<PathBuf>,
}

impl Config {
    /// Reads the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from `lookup`; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let private_key = get("SSH_KEY").ok_or(ConfigError::Missing("SSH_KEY"))?;

        Ok(Self {
            github: GitHubConfig {
                api_base_url: get("GITHUB_API_URL")
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                token: get("GITHUB_TOKEN"),
            },
            aur: AurConfig {
                remote_base: get("AUR_REMOTE_BASE")
                    .unwrap_or_else(|| DEFAULT_REMOTE_BASE.to_string()),
                ssh: SshCredentials {
                    private_key,
                    passphrase: get("SSH_KEY_PASSWORD"),
                },
                known_hosts: get("AUR_KNOWN_HOSTS").map(PathBuf::from),
            },
            assets_dir: get("AUTOUPDATER_ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR)),
            author: Signature::new(
                get("GIT_AUTHOR_NAME").unwrap_or_else(|| DEFAULT_AUTHOR_NAME.to_string()),
                get("GIT_AUTHOR_EMAIL").unwrap_or_else(|| DEFAULT_AUTHOR_EMAIL.to_string()),
            ),
        })
    }
}
