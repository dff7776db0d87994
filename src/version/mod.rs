//! Version layer
//!
//! Everything needed to decide whether a package is outdated and to describe
//! the new release.
//!
//! # Modules
//!
//! - [`types`]: the `Version` value type and normalization
//! - [`registry`]: `ReleaseSource` trait for upstream release lookup
//! - [`registries`]: concrete release sources (GitHub Releases)
//! - [`checksum`]: artifact download and SHA-256 computation
//! - [`error`]: error types for lookup and download operations

pub mod checksum;
pub mod error;
pub mod registries;
pub mod registry;
pub mod types;

pub use types::Version;
