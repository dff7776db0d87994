//! Registered AUR packages
//!
//! Every package the updater knows about is described by a static
//! [`PackageDescriptor`]. Descriptors are compiled in and looked up by name.

use std::fmt;

use crate::version::Version;

/// Packages processed by the binary, in order
pub const DEFAULT_PACKAGES: &[&str] = &[
    "xremap-gnome-bin",
    "xremap-wlroots-bin",
    "xremap-x11-bin",
];

/// Placeholder replaced by the normalized version in release asset URL templates
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Target architecture of a release asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Arch {
    X86_64,
    Aarch64,
}

impl Arch {
    /// Returns the name used by makepkg (`sha256sums_x86_64`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// GitHub repository the package is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upstream {
    pub owner: &'static str,
    pub repo: &'static str,
}

/// A per-architecture release artifact whose checksum goes into the metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseAsset {
    pub arch: Arch,
    /// Download URL with [`VERSION_PLACEHOLDER`] in place of the version
    pub url_template: &'static str,
}

impl ReleaseAsset {
    /// Resolves the download URL for `version`
    pub fn url(&self, version: &Version) -> String {
        self.url_template
            .replace(VERSION_PLACEHOLDER, version.normalized())
    }
}

/// Static description of one AUR package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageDescriptor {
    /// AUR package name, also the name of its AUR git repository
    pub name: &'static str,
    pub upstream: Upstream,
    /// Architecture variants; never empty
    pub assets: &'static [ReleaseAsset],
    /// PKGBUILD template path, relative to the assets directory
    pub pkgbuild_template: &'static str,
    /// .SRCINFO template path, relative to the assets directory
    pub srcinfo_template: &'static str,
}

const XREMAP: Upstream = Upstream {
    owner: "k0kubun",
    repo: "xremap",
};

static PACKAGES: &[PackageDescriptor] = &[
    PackageDescriptor {
        name: "xremap-gnome-bin",
        upstream: XREMAP,
        assets: &[
            ReleaseAsset {
                arch: Arch::X86_64,
                url_template: "https://github.com/k0kubun/xremap/releases/download/v{version}/xremap-linux-x86_64-gnome.zip",
            },
            ReleaseAsset {
                arch: Arch::Aarch64,
                url_template: "https://github.com/k0kubun/xremap/releases/download/v{version}/xremap-linux-aarch64-gnome.zip",
            },
        ],
        pkgbuild_template: "xremap-gnome-bin/PKGBUILD.tera",
        srcinfo_template: "xremap-gnome-bin/.SRCINFO.tera",
    },
    PackageDescriptor {
        name: "xremap-wlroots-bin",
        upstream: XREMAP,
        assets: &[ReleaseAsset {
            arch: Arch::X86_64,
            url_template: "https://github.com/k0kubun/xremap/releases/download/v{version}/xremap-linux-x86_64-wlroots.zip",
        }],
        pkgbuild_template: "xremap-wlroots-bin/PKGBUILD.tera",
        srcinfo_template: "xremap-wlroots-bin/.SRCINFO.tera",
    },
    PackageDescriptor {
        name: "xremap-x11-bin",
        upstream: XREMAP,
        assets: &[ReleaseAsset {
            arch: Arch::X86_64,
            url_template: "https://github.com/k0kubun/xremap/releases/download/v{version}/xremap-linux-x86_64-x11.zip",
        }],
        pkgbuild_template: "xremap-x11-bin/PKGBUILD.tera",
        srcinfo_template: "xremap-x11-bin/.SRCINFO.tera",
    },
];

/// Looks up a registered package by name
pub fn find(name: &str) -> Option<&'static PackageDescriptor> {
    PACKAGES.iter().find(|package| package.name == name)
}

/// All registered packages
pub fn all() -> &'static [PackageDescriptor] {
    PACKAGES
}
