//! Resolve command - print the environment for a target system.

use crate::cli::EXIT_OK;
use devshed_core::{Descriptor, Error, Result, resolve_environment};
use devshed_nix::NixResolver;

/// Run the resolution and print the environment, human-readable by default
/// or as a JSON plan with `--json`.
pub async fn execute(descriptor: &Descriptor, system: Option<&str>, json: bool) -> Result<i32> {
    let system = super::target_system(descriptor, system)?;
    let resolver = NixResolver::new();
    let environment = resolve_environment(descriptor, &system, &resolver).await?;

    if json {
        let plan = serde_json::to_string_pretty(&environment)
            .map_err(|e| Error::serialization(e.to_string()))?;
        println!("{plan}");
    } else {
        println!("system {}", environment.system);
        for path in &environment.search_paths {
            println!("bin    {}", path.display());
        }
        for (key, value) in &environment.vars {
            println!("env    {key}={value}");
        }
    }

    Ok(EXIT_OK)
}
