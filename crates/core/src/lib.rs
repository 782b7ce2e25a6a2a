//! Core types and the resolution contract for the devshed ecosystem.
//!
//! devshed turns a declarative environment descriptor into a concrete shell
//! environment by delegating package resolution to an external resolver (in
//! practice the Nix CLI, provided by the `devshed-nix` crate). This crate
//! holds everything that is independent of that collaborator:
//!
//! - [`descriptor`] - the statically-typed `devshed.toml` model
//! - [`system`] - target system identifiers (`x86_64-linux`, ...)
//! - [`resolver`] - the [`PackageResolver`] port and [`ResolvedPackage`]
//! - [`resolve`] - the pure resolution function producing an [`Environment`]
//! - [`environment`] - the resolved environment value
//! - [`shell`] - shell detection for integration surfaces
//! - [`errors`] - typed errors shared across the workspace
//!
//! Resolution is a pure function of `(descriptor, system)` plus the resolver
//! collaborator: no retries, no partial environments, no side effects beyond
//! whatever the resolver itself performs.

pub mod descriptor;
pub mod environment;
pub mod errors;
pub mod resolve;
pub mod resolver;
pub mod shell;
pub mod system;

pub use descriptor::Descriptor;
pub use environment::Environment;
pub use errors::{Error, Result};
pub use resolve::resolve_environment;
pub use resolver::{InputSource, PackageResolver, ResolvedPackage};
pub use system::{Arch, Os, System};
