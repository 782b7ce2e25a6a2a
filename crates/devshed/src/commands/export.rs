//! Export command - print shell-eval statements for the resolved
//! environment.
//!
//! The output is meant for `eval "$(devshed export)"` (or the fish
//! equivalent): a `PATH` prepend that references the shell's own `$PATH`
//! plus one export per variable binding, with values escaped per shell.

use crate::cli::EXIT_OK;
use devshed_core::shell::Shell;
use devshed_core::{Descriptor, Environment, Result, resolve_environment};
use devshed_nix::NixResolver;

/// Resolve the environment (realizing store paths so they exist on disk)
/// and print export statements for the selected shell dialect.
pub async fn execute(
    descriptor: &Descriptor,
    system: Option<&str>,
    shell: Option<&str>,
) -> Result<i32> {
    let system = super::target_system(descriptor, system)?;
    let shell = Shell::detect(shell);
    let resolver = NixResolver::realizing();
    let environment = resolve_environment(descriptor, &system, &resolver).await?;

    print!("{}", format_exports(&environment, shell));
    Ok(EXIT_OK)
}

/// Format the environment as shell export statements.
fn format_exports(environment: &Environment, shell: Shell) -> String {
    use std::fmt::Write;
    let mut output = String::new();

    if !environment.search_paths.is_empty() {
        match shell {
            Shell::Bash | Shell::Zsh => {
                let joined = environment
                    .search_paths
                    .iter()
                    .map(|p| escape_shell_value(&p.to_string_lossy()))
                    .collect::<Vec<_>>()
                    .join(":");
                let _ = writeln!(&mut output, "export PATH=\"{joined}:$PATH\"");
            }
            Shell::Fish => {
                let entries = environment
                    .search_paths
                    .iter()
                    .map(|p| format!("\"{}\"", escape_shell_value(&p.to_string_lossy())))
                    .collect::<Vec<_>>()
                    .join(" ");
                let _ = writeln!(&mut output, "set -x PATH {entries} $PATH");
            }
        }
    }

    for (key, value) in &environment.vars {
        let escaped = escape_shell_value(value);
        match shell {
            Shell::Bash | Shell::Zsh => {
                let _ = writeln!(&mut output, "export {key}=\"{escaped}\"");
            }
            Shell::Fish => {
                let _ = writeln!(&mut output, "set -x {key} \"{escaped}\"");
            }
        }
    }

    output
}

/// Escape special characters in shell values.
fn escape_shell_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
        .replace('`', "\\`")
}

#[cfg(test)]
mod tests {
    use super::*;
    use devshed_core::{Arch, Os, System};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn environment() -> Environment {
        Environment {
            system: System::new(Arch::X86_64, Os::Linux),
            search_paths: vec![
                PathBuf::from("/nix/store/aaa-cargo/bin"),
                PathBuf::from("/nix/store/bbb-rustc/bin"),
            ],
            vars: BTreeMap::from([
                (
                    "RUST_SRC_PATH".to_string(),
                    "/nix/store/ccc-rust-src".to_string(),
                ),
                ("GREETING".to_string(), "say \"hi\"".to_string()),
            ]),
        }
    }

    #[test]
    fn test_bash_exports() {
        let out = format_exports(&environment(), Shell::Bash);
        assert!(out.contains(
            "export PATH=\"/nix/store/aaa-cargo/bin:/nix/store/bbb-rustc/bin:$PATH\""
        ));
        assert!(out.contains("export RUST_SRC_PATH=\"/nix/store/ccc-rust-src\""));
        assert!(out.contains("export GREETING=\"say \\\"hi\\\"\""));
    }

    #[test]
    fn test_fish_exports() {
        let out = format_exports(&environment(), Shell::Fish);
        assert!(out.contains(
            "set -x PATH \"/nix/store/aaa-cargo/bin\" \"/nix/store/bbb-rustc/bin\" $PATH"
        ));
        assert!(out.contains("set -x RUST_SRC_PATH \"/nix/store/ccc-rust-src\""));
    }

    #[test]
    fn test_no_path_line_without_search_paths() {
        let env = Environment {
            system: System::new(Arch::Aarch64, Os::Darwin),
            search_paths: vec![],
            vars: BTreeMap::from([("ONLY".to_string(), "x".to_string())]),
        };
        let out = format_exports(&env, Shell::Zsh);
        assert!(!out.contains("PATH"));
        assert!(out.contains("export ONLY=\"x\""));
    }

    #[test]
    fn test_escape_shell_value() {
        assert_eq!(escape_shell_value("simple"), "simple");
        assert_eq!(escape_shell_value("$HOME"), "\\$HOME");
        assert_eq!(escape_shell_value("`cmd`"), "\\`cmd\\`");
        assert_eq!(escape_shell_value("a\\b"), "a\\\\b");
        assert_eq!(escape_shell_value("say \"hi\""), "say \\\"hi\\\"");
    }
}
