//! Check command - validate the descriptor and resolver prerequisites.

use crate::cli::EXIT_OK;
use devshed_core::resolver::PackageResolver;
use devshed_core::{Descriptor, Result};
use devshed_nix::NixResolver;

/// Report on an already-loaded descriptor. Parsing and validation happen at
/// load time, so reaching this point means the file is well-formed; the
/// summary makes that visible, and `--prereqs` additionally probes the
/// resolver's backing CLI.
pub async fn execute(descriptor: &Descriptor, prereqs: bool) -> Result<i32> {
    let tools = descriptor.package_set()?;
    println!(
        "descriptor OK: {} inputs, {} packages, {} env vars, {} systems",
        descriptor.inputs.len(),
        tools.len(),
        descriptor.env.len(),
        descriptor.supported_systems().len()
    );

    if prereqs {
        NixResolver::new().check_prerequisites().await?;
        println!("resolver prerequisites OK");
    }

    Ok(EXIT_OK)
}
