//! Keeps AUR packages in sync with their upstream GitHub releases
//!
//! - [`package`]: compiled-in package descriptors
//! - [`parser`]: `.SRCINFO` parser
//! - [`version`]: version value, upstream release lookup and checksums
//! - [`render`]: PKGBUILD / .SRCINFO template rendering
//! - [`vcs`]: AUR git repository access
//! - [`updater`]: the update pipeline tying everything together

pub mod config;
pub mod package;
pub mod parser;
pub mod render;
pub mod updater;
pub mod vcs;
pub mod version;
