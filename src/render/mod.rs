//! PKGBUILD / .SRCINFO rendering
//!
//! Each package ships two Tera templates under the assets directory. Both are
//! rendered with the same context:
//!
//! | Variable     | Value                                          |
//! |--------------|------------------------------------------------|
//! | `pkgname`    | AUR package name                               |
//! | `pkgver`     | new version without its `v` prefix             |
//! | `sha256sums` | map of arch (`x86_64`, `aarch64`) to checksum  |

use std::collections::BTreeMap;
use std::path::PathBuf;

use tera::{Context, Tera};
use tracing::debug;

use crate::package::{self, Arch, PackageDescriptor};
use crate::version::Version;

pub mod error;

pub use error::RenderError;

/// Checksums keyed by architecture
pub type Checksums = BTreeMap<Arch, String>;

/// Rendered contents of a package's two metadata files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMetadata {
    pub pkgbuild: String,
    pub srcinfo: String,
}

/// Renders package metadata from the templates in an assets directory
pub struct MetadataRenderer {
    assets_dir: PathBuf,
}

impl MetadataRenderer {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    /// Renders the PKGBUILD and .SRCINFO of `package_name` for `version`
    ///
    /// `checksums` must contain an entry for every architecture the package
    /// declares; extra entries are ignored.
    pub fn render(
        &self,
        package_name: &str,
        version: &Version,
        checksums: &Checksums,
    ) -> Result<RenderedMetadata, RenderError> {
        let package = package::find(package_name)
            .ok_or_else(|| RenderError::UnknownPackage(package_name.to_string()))?;

        let context = build_context(package, version, checksums)?;

        Ok(RenderedMetadata {
            pkgbuild: self.render_template(package.pkgbuild_template, &context)?,
            srcinfo: self.render_template(package.srcinfo_template, &context)?,
        })
    }

    fn render_template(
        &self,
        relative_path: &str,
        context: &Context,
    ) -> Result<String, RenderError> {
        let path = self.assets_dir.join(relative_path);
        let template = std::fs::read_to_string(&path)
            .map_err(|source| RenderError::TemplateNotFound { path: path.clone(), source })?;

        debug!("Rendering {}", path.display());

        Ok(Tera::one_off(&template, context, false)?)
    }
}

fn build_context(
    package: &PackageDescriptor,
    version: &Version,
    checksums: &Checksums,
) -> Result<Context, RenderError> {
    let mut sha256sums = BTreeMap::new();
    for asset in package.assets {
        let sum = checksums
            .get(&asset.arch)
            .ok_or_else(|| RenderError::MissingChecksum {
                package: package.name.to_string(),
                arch: asset.arch,
            })?;
        sha256sums.insert(asset.arch.as_str(), sum.as_str());
    }

    let mut context = Context::new();
    context.insert("pkgname", package.name);
    context.insert("pkgver", version.normalized());
    context.insert("sha256sums", &sha256sums);
    Ok(context)
}
