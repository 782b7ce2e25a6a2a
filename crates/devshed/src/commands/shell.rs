//! Shell command - spawn an interactive shell with the resolved
//! environment.

use crate::cli::EXIT_OK;
use devshed_core::{Descriptor, Error, Result, resolve_environment};
use devshed_nix::NixResolver;
use std::path::PathBuf;
use tracing::info;

/// Resolve the environment (realizing store paths) and spawn `$SHELL` with
/// the augmented `PATH` and variable bindings applied. The child's exit
/// code becomes ours.
pub async fn execute(descriptor: &Descriptor, system: Option<&str>) -> Result<i32> {
    let system = super::target_system(descriptor, system)?;
    let resolver = NixResolver::realizing();
    let environment = resolve_environment(descriptor, &system, &resolver).await?;

    let program = std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string());
    let path_value = environment.path_value(std::env::var("PATH").ok().as_deref());

    info!(shell = %program, %system, "spawning shell");

    let mut command = tokio::process::Command::new(&program);
    command.env("PATH", path_value);
    for (key, value) in &environment.vars {
        command.env(key, value);
    }

    let status = command
        .status()
        .await
        .map_err(|e| Error::io(e, Some(PathBuf::from(&program)), "spawn shell"))?;

    Ok(status.code().unwrap_or(EXIT_OK))
}
