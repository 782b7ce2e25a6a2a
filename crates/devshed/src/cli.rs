//! Command-line interface definition and exit-code mapping.

use clap::{Parser, Subcommand};
use devshed_core::Error;
use std::path::PathBuf;

/// Exit code for success.
pub const EXIT_OK: i32 = 0;
/// Exit code for CLI or configuration errors.
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for resolution failures.
pub const EXIT_RESOLVE: i32 = 3;

/// Declarative developer shells resolved through Nix.
#[derive(Parser, Debug)]
#[command(name = "devshed", version, about)]
pub struct Cli {
    /// Path to the descriptor file (defaults to searching upward for
    /// devshed.toml)
    #[arg(long, global = true)]
    pub descriptor: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// devshed subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the environment for a target system
    Resolve {
        /// Target system identifier (defaults to the current host)
        #[arg(long)]
        system: Option<String>,

        /// Print the resolved environment as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print shell export statements for the resolved environment
    Export {
        /// Target system identifier (defaults to the current host)
        #[arg(long)]
        system: Option<String>,

        /// Shell dialect to emit (defaults to $SHELL detection)
        #[arg(long)]
        shell: Option<String>,
    },
    /// Spawn an interactive shell with the resolved environment
    Shell {
        /// Target system identifier (defaults to the current host)
        #[arg(long)]
        system: Option<String>,
    },
    /// Validate the descriptor
    Check {
        /// Also verify resolver prerequisites (requires Nix)
        #[arg(long)]
        prereqs: bool,
    },
    /// List the systems the descriptor supports
    Systems,
}

/// Map a core error to the process exit code.
pub fn exit_code_for(error: &Error) -> i32 {
    match error {
        Error::Configuration { .. } | Error::Io { .. } | Error::Serialization { .. } => EXIT_CONFIG,
        Error::UnsupportedSystem { .. }
        | Error::UnresolvedPackage { .. }
        | Error::SourceFetch { .. } => EXIT_RESOLVE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(exit_code_for(&Error::configuration("bad")), EXIT_CONFIG);
        assert_eq!(
            exit_code_for(&Error::serialization("bad json")),
            EXIT_CONFIG
        );
        assert_eq!(
            exit_code_for(&Error::unsupported_system("mips-linux", ["x86_64-linux"])),
            EXIT_RESOLVE
        );
        assert_eq!(
            exit_code_for(&Error::unresolved_package("foo", "nixpkgs", "x86_64-linux")),
            EXIT_RESOLVE
        );
        assert_eq!(exit_code_for(&Error::source_fetch("down")), EXIT_RESOLVE);
    }

    #[test]
    fn test_parse_resolve_with_system() {
        let cli = Cli::try_parse_from(["devshed", "resolve", "--system", "x86_64-linux", "--json"])
            .unwrap();
        match cli.command {
            Command::Resolve { system, json } => {
                assert_eq!(system.as_deref(), Some("x86_64-linux"));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_descriptor_flag_after_subcommand() {
        let cli =
            Cli::try_parse_from(["devshed", "systems", "--descriptor", "/tmp/devshed.toml"])
                .unwrap();
        assert_eq!(cli.descriptor.as_deref(), Some(std::path::Path::new("/tmp/devshed.toml")));
    }
}
