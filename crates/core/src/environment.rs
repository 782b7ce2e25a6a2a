//! The resolved shell environment.
//!
//! An [`Environment`] is the output of a successful resolution: search-path
//! entries for every declared tool plus the exported variable bindings. Its
//! lifetime is scoped to the invoking shell session; devshed never persists
//! it.

use crate::system::System;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A resolved shell environment for one target system.
///
/// Search-path entries are ordered by the resolving package's name, so two
/// resolutions of the same descriptor against identical resolver state
/// produce identical values regardless of declaration order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Environment {
    /// The system this environment was resolved for
    pub system: System,
    /// Executable search-path entries, one `bin/` directory per tool
    pub search_paths: Vec<PathBuf>,
    /// Exported variable bindings in sorted order
    pub vars: BTreeMap<String, String>,
}

impl Environment {
    /// Whether the environment carries no paths and no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search_paths.is_empty() && self.vars.is_empty()
    }

    /// Render the `PATH` value: the search-path entries joined with `:`,
    /// followed by `existing` when present.
    #[must_use]
    pub fn path_value(&self, existing: Option<&str>) -> String {
        let joined = self
            .search_paths
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(":");
        match existing {
            Some(rest) if !rest.is_empty() => {
                if joined.is_empty() {
                    rest.to_string()
                } else {
                    format!("{joined}:{rest}")
                }
            }
            _ => joined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::{Arch, Os};

    fn sample() -> Environment {
        Environment {
            system: System::new(Arch::X86_64, Os::Linux),
            search_paths: vec![
                PathBuf::from("/nix/store/aaa-cargo/bin"),
                PathBuf::from("/nix/store/bbb-rustc/bin"),
            ],
            vars: BTreeMap::from([("RUST_SRC_PATH".to_string(), "/nix/store/ccc".to_string())]),
        }
    }

    #[test]
    fn test_path_value_prepends_existing() {
        let env = sample();
        assert_eq!(
            env.path_value(Some("/usr/bin:/bin")),
            "/nix/store/aaa-cargo/bin:/nix/store/bbb-rustc/bin:/usr/bin:/bin"
        );
    }

    #[test]
    fn test_path_value_without_existing() {
        let env = sample();
        assert_eq!(
            env.path_value(None),
            "/nix/store/aaa-cargo/bin:/nix/store/bbb-rustc/bin"
        );
        assert_eq!(env.path_value(Some("")), env.path_value(None));
    }

    #[test]
    fn test_path_value_empty_environment() {
        let env = Environment {
            system: System::new(Arch::Aarch64, Os::Darwin),
            search_paths: vec![],
            vars: BTreeMap::new(),
        };
        assert!(env.is_empty());
        assert_eq!(env.path_value(Some("/bin")), "/bin");
        assert_eq!(env.path_value(None), "");
    }

    #[test]
    fn test_serialize_plan() {
        let env = sample();
        let json = serde_json::to_string(&env).unwrap();
        assert!(json.contains("\"system\":\"x86_64-linux\""));
        assert!(json.contains("RUST_SRC_PATH"));
    }
}
