//! The package-resolver port.
//!
//! Resolution of names into concrete installable artifacts is the job of an
//! external collaborator. This module defines the seam: given an input
//! source, a target system, and a package name, a [`PackageResolver`] either
//! returns the package's installation path or fails with a typed error. The
//! engine in [`crate::resolve`] is written against this trait only, so the
//! collaborator can be the Nix CLI in production and a stub in tests.

use crate::errors::Result;
use crate::system::System;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A named input source handed to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSource<'a> {
    /// Input name as declared in the descriptor
    pub name: &'a str,
    /// Resolver locator, passed through verbatim
    pub locator: &'a str,
}

/// A package resolved to its installation path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedPackage {
    /// Package name as requested
    pub name: String,
    /// Resolved installation path
    pub store_path: PathBuf,
}

impl ResolvedPackage {
    /// The executable directory this package contributes to the search path.
    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        self.store_path.join("bin")
    }
}

/// Trait for package resolvers.
///
/// Implementations own all fetching, building, and caching concerns; the
/// descriptor layer never performs network or store I/O itself.
#[async_trait]
pub trait PackageResolver: Send + Sync {
    /// Resolver name (e.g. "nix").
    fn name(&self) -> &'static str;

    /// Resolve `name` from `input` for `system`.
    ///
    /// # Errors
    ///
    /// [`Error::UnresolvedPackage`] when the package collection for `system`
    /// does not provide `name`; [`Error::SourceFetch`] for any
    /// collaborator-side failure, propagated opaquely.
    ///
    /// [`Error::UnresolvedPackage`]: crate::errors::Error::UnresolvedPackage
    /// [`Error::SourceFetch`]: crate::errors::Error::SourceFetch
    async fn resolve(
        &self,
        input: &InputSource<'_>,
        system: &System,
        name: &str,
    ) -> Result<ResolvedPackage>;

    /// Check that the resolver's prerequisites are available.
    ///
    /// Called early so a missing backing CLI fails fast with a helpful
    /// message instead of surfacing mid-resolution.
    async fn check_prerequisites(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_dir() {
        let pkg = ResolvedPackage {
            name: "rustc".to_string(),
            store_path: PathBuf::from("/nix/store/abc-rustc-1.85.0"),
        };
        assert_eq!(
            pkg.bin_dir(),
            PathBuf::from("/nix/store/abc-rustc-1.85.0/bin")
        );
    }

    #[test]
    fn test_resolved_package_serialization() {
        let pkg = ResolvedPackage {
            name: "jq".to_string(),
            store_path: PathBuf::from("/nix/store/abc-jq-1.7.1"),
        };
        let json = serde_json::to_string(&pkg).unwrap();
        assert!(json.contains("\"name\":\"jq\""));
        assert!(json.contains("abc-jq-1.7.1"));
    }
}
