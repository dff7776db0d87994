//! In-memory collaborators for driving the updater without network or git

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use aur_autoupdater::vcs::{RemoteRepository, Signature, TransportError, WorkingCopy};
use aur_autoupdater::version::checksum::ChecksumFetcher;
use aur_autoupdater::version::error::FetchError;

/// A commit recorded by [`MemoryRepository`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommit {
    pub message: String,
    pub author: Signature,
    pub files: HashMap<String, String>,
}

#[derive(Debug, Default)]
pub struct RepositoryState {
    pub checkouts: Vec<String>,
    pub files: HashMap<String, HashMap<String, String>>,
    pub staged: Vec<String>,
    pub commits: Vec<RecordedCommit>,
    pub pushed: Vec<String>,
}

/// Repository whose working copies share one in-memory state per package
#[derive(Clone, Default)]
pub struct MemoryRepository {
    state: Arc<Mutex<RepositoryState>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, package: &str, path: &str, contents: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .files
            .entry(package.to_string())
            .or_default()
            .insert(path.to_string(), contents.to_string());
        self
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, RepositoryState> {
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl RemoteRepository for MemoryRepository {
    async fn checkout(&self, package_name: &str) -> Result<Box<dyn WorkingCopy>, TransportError> {
        self.state
            .lock()
            .unwrap()
            .checkouts
            .push(package_name.to_string());
        Ok(Box::new(MemoryWorkingCopy {
            package: package_name.to_string(),
            state: self.state.clone(),
        }))
    }
}

struct MemoryWorkingCopy {
    package: String,
    state: Arc<Mutex<RepositoryState>>,
}

#[async_trait]
impl WorkingCopy for MemoryWorkingCopy {
    async fn read_file(&self, path: &str) -> Result<String, TransportError> {
        let state = self.state.lock().unwrap();
        state
            .files
            .get(&self.package)
            .and_then(|files| files.get(path))
            .cloned()
            .ok_or_else(|| TransportError::Io {
                path: path.into(),
                source: std::io::ErrorKind::NotFound.into(),
            })
    }

    async fn write_file(&mut self, path: &str, contents: &str) -> Result<(), TransportError> {
        self.state
            .lock()
            .unwrap()
            .files
            .entry(self.package.clone())
            .or_default()
            .insert(path.to_string(), contents.to_string());
        Ok(())
    }

    async fn stage(&mut self, paths: &[&str]) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        state.staged.extend(paths.iter().map(|p| p.to_string()));
        Ok(())
    }

    async fn commit(
        &mut self,
        message: &str,
        author: &Signature,
    ) -> Result<String, TransportError> {
        let mut state = self.state.lock().unwrap();
        let files = state.files.get(&self.package).cloned().unwrap_or_default();
        state.commits.push(RecordedCommit {
            message: message.to_string(),
            author: author.clone(),
            files,
        });
        Ok(format!("{:040x}", state.commits.len()))
    }

    async fn push(&mut self) -> Result<(), TransportError> {
        self.state.lock().unwrap().pushed.push(self.package.clone());
        Ok(())
    }
}

/// Checksum fetcher returning fixed digests per URL
#[derive(Clone, Default)]
pub struct StaticChecksums {
    sums: HashMap<String, String>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl StaticChecksums {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sum(mut self, url: &str, sum: &str) -> Self {
        self.sums.insert(url.to_string(), sum.to_string());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChecksumFetcher for StaticChecksums {
    async fn sha256(&self, url: &str) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        // Unknown URLs behave like a missing release asset
        match self.sums.get(url) {
            Some(sum) => Ok(sum.clone()),
            None => Err(FetchError::Status {
                status: reqwest::StatusCode::NOT_FOUND,
                url: url.to_string(),
            }),
        }
    }
}
