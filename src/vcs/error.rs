use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to run git {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("git {command} exited with {status}: {stderr}")]
    Git {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

impl TransportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TransportError::Io {
            path: path.into(),
            source,
        }
    }
}
