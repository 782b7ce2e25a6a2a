//! Pure resolution of a descriptor into an [`Environment`].
//!
//! [`resolve_environment`] is the operation the whole crate exists for:
//! given a descriptor, a target system, and a resolver collaborator, it
//! either produces an environment containing every declared tool reference
//! or fails with a typed error. Nothing is retried and nothing is silently
//! omitted; a single missing package fails the whole resolution.

use crate::descriptor::{Descriptor, EnvValue};
use crate::environment::Environment;
use crate::errors::{Error, Result};
use crate::resolver::{InputSource, PackageResolver, ResolvedPackage};
use crate::system::System;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Resolve `descriptor` for `system` against `resolver`.
///
/// The supported-system gate runs before any resolver query: an unsupported
/// identifier never reaches the collaborator. Tool references resolve in
/// package-name order and each package resolves at most once per call, even
/// when referenced both as a tool and from a variable binding.
///
/// # Errors
///
/// [`Error::UnsupportedSystem`] when `system` is outside the descriptor's
/// supported set; [`Error::UnresolvedPackage`] naming the first reference the
/// resolver cannot find; [`Error::SourceFetch`] propagated opaquely from the
/// collaborator.
pub async fn resolve_environment(
    descriptor: &Descriptor,
    system: &System,
    resolver: &dyn PackageResolver,
) -> Result<Environment> {
    let supported = descriptor.supported_systems();
    if !supported.contains(system) {
        return Err(Error::unsupported_system(system, &supported));
    }

    debug!(%system, resolver = resolver.name(), "resolving environment");

    let mut cache: BTreeMap<(String, String), ResolvedPackage> = BTreeMap::new();

    // Tool references, in package-name order (set semantics)
    let tools = descriptor.package_set()?;
    let mut search_paths = Vec::with_capacity(tools.len());
    for (name, input_name) in &tools {
        let package =
            resolve_cached(descriptor, resolver, system, input_name, name, &mut cache).await?;
        let bin = package.bin_dir();
        if !search_paths.contains(&bin) {
            search_paths.push(bin);
        }
    }

    // Variable bindings: literals copied, derived values taken from resolved
    // installation paths
    let mut vars = BTreeMap::new();
    for (key, value) in &descriptor.env {
        let rendered = match value {
            EnvValue::Literal(text) => text.clone(),
            EnvValue::FromPackage(binding) => {
                let input_name = match binding.input.as_deref() {
                    Some(name) => name,
                    None => descriptor.default_input()?,
                };
                let package = resolve_cached(
                    descriptor,
                    resolver,
                    system,
                    input_name,
                    &binding.package,
                    &mut cache,
                )
                .await?;
                let path = match binding.subpath.as_deref() {
                    Some(subpath) => package.store_path.join(subpath),
                    None => package.store_path.clone(),
                };
                path.to_string_lossy().into_owned()
            }
        };
        vars.insert(key.clone(), rendered);
    }

    info!(
        %system,
        tools = tools.len(),
        vars = vars.len(),
        "environment resolved"
    );

    Ok(Environment {
        system: *system,
        search_paths,
        vars,
    })
}

/// Resolve one package, reusing an earlier result for the same
/// `(input, name)` pair within this resolution.
async fn resolve_cached(
    descriptor: &Descriptor,
    resolver: &dyn PackageResolver,
    system: &System,
    input_name: &str,
    name: &str,
    cache: &mut BTreeMap<(String, String), ResolvedPackage>,
) -> Result<ResolvedPackage> {
    let key = (input_name.to_string(), name.to_string());
    if let Some(hit) = cache.get(&key) {
        return Ok(hit.clone());
    }

    let locator = descriptor.inputs.get(input_name).ok_or_else(|| {
        Error::configuration(format!("undeclared input `{input_name}`"))
    })?;
    let input = InputSource {
        name: input_name,
        locator,
    };

    let package = resolver.resolve(&input, system, name).await?;
    debug!(%name, input = %input_name, path = %package.store_path.display(), "package resolved");
    cache.insert(key, package.clone());
    Ok(package)
}
