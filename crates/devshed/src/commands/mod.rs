//! CLI command implementations.

pub mod check;
pub mod export;
pub mod resolve;
pub mod shell;
pub mod systems;

use crate::cli::{Cli, Command};
use devshed_core::descriptor::{self, DESCRIPTOR_FILE};
use devshed_core::{Descriptor, Error, Result, System};
use std::path::Path;

/// Dispatch the parsed CLI to its command, returning the exit code.
pub async fn run(cli: Cli) -> Result<i32> {
    let descriptor = load_descriptor(cli.descriptor.as_deref())?;
    match cli.command {
        Command::Resolve { system, json } => {
            resolve::execute(&descriptor, system.as_deref(), json).await
        }
        Command::Export { system, shell } => {
            export::execute(&descriptor, system.as_deref(), shell.as_deref()).await
        }
        Command::Shell { system } => shell::execute(&descriptor, system.as_deref()).await,
        Command::Check { prereqs } => check::execute(&descriptor, prereqs).await,
        Command::Systems => systems::execute(&descriptor),
    }
}

/// Load the descriptor from the given path, or search upward from the
/// working directory.
fn load_descriptor(path: Option<&Path>) -> Result<Descriptor> {
    match path {
        Some(explicit) => Descriptor::load(explicit),
        None => {
            let cwd = std::env::current_dir()
                .map_err(|e| Error::io(e, None, "determine working directory"))?;
            let found = descriptor::find_descriptor(&cwd).ok_or_else(|| {
                Error::configuration(format!(
                    "no {DESCRIPTOR_FILE} found here or in any parent directory"
                ))
            })?;
            Descriptor::load(&found)
        }
    }
}

/// Parse the requested system identifier, falling back to the host system.
///
/// An identifier that does not parse is by definition outside the supported
/// set, so it surfaces as an unsupported-system error before any resolver
/// query.
pub(crate) fn target_system(descriptor: &Descriptor, requested: Option<&str>) -> Result<System> {
    match requested {
        Some(raw) => System::parse(raw)
            .ok_or_else(|| Error::unsupported_system(raw, &descriptor.supported_systems())),
        None => Ok(System::current()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> Descriptor {
        Descriptor::from_toml(
            r#"
            systems = ["x86_64-linux"]

            [inputs]
            nixpkgs = "github:NixOS/nixpkgs/nixos-unstable"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_target_system_parses_requested() {
        let system = target_system(&descriptor(), Some("x86_64-linux")).unwrap();
        assert_eq!(system.to_string(), "x86_64-linux");
    }

    #[test]
    fn test_target_system_rejects_garbage() {
        let err = target_system(&descriptor(), Some("teapot")).unwrap_err();
        match err {
            Error::UnsupportedSystem { system, supported } => {
                assert_eq!(system, "teapot");
                assert_eq!(supported, "x86_64-linux");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_target_system_defaults_to_host() {
        let system = target_system(&descriptor(), None).unwrap();
        assert_eq!(system, System::current());
    }
}
