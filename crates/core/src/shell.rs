//! Shell type definitions and utilities.
//!
//! Shell detection and naming used by the export and subshell surfaces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported shell dialects for environment integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Shell {
    /// Bash shell
    #[default]
    Bash,
    /// Z shell
    Zsh,
    /// Fish shell
    Fish,
}

impl Shell {
    /// Detect shell from environment or argument.
    #[must_use]
    pub fn detect(target: Option<&str>) -> Self {
        if let Some(t) = target {
            return Self::parse(t);
        }

        if let Ok(shell) = std::env::var("SHELL") {
            if shell.contains("fish") {
                return Shell::Fish;
            } else if shell.contains("zsh") {
                return Shell::Zsh;
            }
        }

        Shell::Bash
    }

    /// Parse shell from string, defaulting to bash.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "zsh" => Shell::Zsh,
            "fish" => Shell::Fish,
            _ => Shell::Bash,
        }
    }

    /// Get the name of the shell.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Shell::Bash => "bash",
            Shell::Zsh => "zsh",
            Shell::Fish => "fish",
        }
    }
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_parse() {
        assert_eq!(Shell::parse("bash"), Shell::Bash);
        assert_eq!(Shell::parse("zsh"), Shell::Zsh);
        assert_eq!(Shell::parse("fish"), Shell::Fish);
        assert_eq!(Shell::parse("unknown"), Shell::Bash);
        assert_eq!(Shell::parse("ZSH"), Shell::Zsh);
    }

    #[test]
    fn test_shell_detect_with_target() {
        assert_eq!(Shell::detect(Some("fish")), Shell::Fish);
        assert_eq!(Shell::detect(Some("zsh")), Shell::Zsh);
    }

    #[test]
    fn test_shell_detect_from_env() {
        temp_env::with_var("SHELL", Some("/usr/bin/fish"), || {
            assert_eq!(Shell::detect(None), Shell::Fish);
        });
        temp_env::with_var("SHELL", Some("/bin/zsh"), || {
            assert_eq!(Shell::detect(None), Shell::Zsh);
        });
        temp_env::with_var_unset("SHELL", || {
            assert_eq!(Shell::detect(None), Shell::Bash);
        });
    }

    #[test]
    fn test_shell_display() {
        assert_eq!(Shell::Bash.to_string(), "bash");
        assert_eq!(Shell::Zsh.to_string(), "zsh");
        assert_eq!(Shell::Fish.to_string(), "fish");
    }
}
