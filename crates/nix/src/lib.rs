//! Nix flake package resolver for devshed.
//!
//! Implements the [`PackageResolver`] port by querying the `nix` CLI. A
//! descriptor input's locator is a flake reference; a package name resolves
//! through the flake's `packages.<system>.<name>` output, falling back to
//! `legacyPackages.<system>.<name>` the way the Nix CLI itself resolves bare
//! attribute installables.
//!
//! All fetching, building, caching, and sandboxing stay behind the `nix`
//! CLI; this crate only classifies its outcomes into the typed errors the
//! core defines.

pub mod commands;

use async_trait::async_trait;
use commands::AttrOutcome;
use devshed_core::{Error, InputSource, PackageResolver, ResolvedPackage, Result, System};
use tracing::{debug, info};

/// Package resolver backed by the Nix CLI.
pub struct NixResolver {
    /// Realize store paths with `nix build` instead of only evaluating them.
    /// Evaluation is enough for a plan; a usable shell needs realized paths.
    realize: bool,
}

impl Default for NixResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl NixResolver {
    /// Create a resolver that evaluates store paths without realizing them.
    #[must_use]
    pub fn new() -> Self {
        Self { realize: false }
    }

    /// Create a resolver that realizes store paths so they exist on disk.
    #[must_use]
    pub fn realizing() -> Self {
        Self { realize: true }
    }

    /// Whether this resolver realizes store paths.
    #[must_use]
    pub fn realizes(&self) -> bool {
        self.realize
    }

    /// The flake output attributes tried for a package, in order.
    fn attr_candidates(system: &System, name: &str) -> [String; 2] {
        [
            format!("packages.{system}.{name}"),
            format!("legacyPackages.{system}.{name}"),
        ]
    }

    async fn query(&self, installable: &str) -> Result<AttrOutcome> {
        if self.realize {
            commands::build_out_path(installable).await
        } else {
            commands::eval_out_path(installable).await
        }
    }
}

#[async_trait]
impl PackageResolver for NixResolver {
    fn name(&self) -> &'static str {
        "nix"
    }

    async fn resolve(
        &self,
        input: &InputSource<'_>,
        system: &System,
        name: &str,
    ) -> Result<ResolvedPackage> {
        debug!(
            %name,
            input = %input.name,
            locator = %input.locator,
            %system,
            "resolving Nix package"
        );

        for attr in Self::attr_candidates(system, name) {
            let installable = format!("{}#{attr}", input.locator);
            match self.query(&installable).await? {
                AttrOutcome::Path(store_path) => {
                    info!(%name, path = %store_path.display(), "resolved Nix package");
                    return Ok(ResolvedPackage {
                        name: name.to_string(),
                        store_path,
                    });
                }
                AttrOutcome::Missing => {}
            }
        }

        Err(Error::unresolved_package(name, input.name, system))
    }

    async fn check_prerequisites(&self) -> Result<()> {
        if commands::check_available().await {
            Ok(())
        } else {
            Err(Error::source_fetch_with_help(
                "Nix with flakes support is not available",
                "Install Nix: https://nixos.org/download.html",
            ))
        }
    }
}
