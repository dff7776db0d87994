use std::path::PathBuf;

use thiserror::Error;

use crate::package::Arch;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unknown package: {0}")]
    UnknownPackage(String),

    #[error("Template not found: {}", path.display())]
    TemplateNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No {arch} checksum provided for {package}")]
    MissingChecksum { package: String, arch: Arch },

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),
}
