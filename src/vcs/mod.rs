//! Version-control layer
//!
//! The updater talks to AUR git repositories through two traits:
//! [`RemoteRepository`] hands out a fresh [`WorkingCopy`] per run, and the
//! working copy is dropped (and its checkout deleted) when the run ends.

pub mod error;
pub mod git;

pub use error::TransportError;
pub use git::{GitRemote, SshCredentials};

/// Commit author identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    pub email: String,
}

impl Signature {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Source of working copies for AUR package repositories
#[async_trait::async_trait]
pub trait RemoteRepository: Send + Sync {
    /// Clones the repository of `package_name` into a fresh working copy
    async fn checkout(&self, package_name: &str) -> Result<Box<dyn WorkingCopy>, TransportError>;
}

/// An ephemeral checkout of one package repository
///
/// Paths are relative to the repository root.
#[async_trait::async_trait]
pub trait WorkingCopy: Send + Sync {
    async fn read_file(&self, path: &str) -> Result<String, TransportError>;

    /// Overwrites `path` with `contents`
    async fn write_file(&mut self, path: &str, contents: &str) -> Result<(), TransportError>;

    async fn stage(&mut self, paths: &[&str]) -> Result<(), TransportError>;

    /// Commits the staged changes and returns the new commit id
    async fn commit(&mut self, message: &str, author: &Signature) -> Result<String, TransportError>;

    /// Pushes the current branch to the remote it was cloned from
    async fn push(&mut self) -> Result<(), TransportError>;
}
