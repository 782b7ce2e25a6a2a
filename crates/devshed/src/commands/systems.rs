//! Systems command - list the supported target systems.

use crate::cli::EXIT_OK;
use devshed_core::{Descriptor, Result};

/// Print the descriptor's supported system identifiers, one per line.
pub fn execute(descriptor: &Descriptor) -> Result<i32> {
    for system in descriptor.supported_systems() {
        println!("{system}");
    }
    Ok(EXIT_OK)
}
