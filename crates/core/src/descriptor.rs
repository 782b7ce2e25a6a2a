//! The devshed environment descriptor.
//!
//! `devshed.toml` declares named package inputs, the target systems the
//! descriptor supports, the tools a shell should expose, and exported
//! variable bindings:
//!
//! ```toml
//! systems = ["x86_64-linux", "aarch64-darwin"]
//!
//! [inputs]
//! nixpkgs = "github:NixOS/nixpkgs/nixos-unstable"
//!
//! [shell]
//! packages = ["rustc", "cargo", { name = "nil", input = "nixpkgs" }]
//!
//! [env]
//! RUST_SRC_PATH = { package = "rustPlatform.rustLibSrc" }
//! ```
//!
//! The descriptor is static, author-edited data: it performs no I/O of its
//! own and resolution happens on demand against a [`PackageResolver`].
//!
//! [`PackageResolver`]: crate::resolver::PackageResolver

use crate::errors::{Error, Result};
use crate::system::System;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name searched for by [`find_descriptor`].
pub const DESCRIPTOR_FILE: &str = "devshed.toml";

/// A declarative development-environment descriptor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Descriptor {
    /// Named package inputs: input name mapped to a resolver locator such as
    /// `github:NixOS/nixpkgs/nixos-unstable`. Map keys guarantee name
    /// uniqueness; locators pass to the resolver verbatim.
    pub inputs: BTreeMap<String, String>,

    /// Systems this descriptor supports. Empty means the default set from
    /// [`System::defaults`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub systems: Vec<System>,

    /// Tools exposed on the shell search path.
    #[serde(default)]
    pub shell: ShellConfig,

    /// Exported variable bindings.
    /// Keys must match pattern: ^[A-Z_][A-Z0-9_]*$
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, EnvValue>,
}

/// Shell tool declarations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ShellConfig {
    /// Input used when a package does not name one. May be omitted when
    /// exactly one input is declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    /// Packages placed on the shell search path. The list has set semantics:
    /// declaration order and duplicates do not affect the resulting
    /// environment.
    #[serde(default)]
    pub packages: Vec<PackageSpec>,
}

/// A tool reference: a bare package name or a name qualified with an input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PackageSpec {
    /// Detailed form (must come first so serde tries the table shape before
    /// the plain string)
    Detailed {
        /// Package name resolved against the input
        name: String,
        /// Input to resolve against; the default input when absent
        #[serde(skip_serializing_if = "Option::is_none")]
        input: Option<String>,
    },
    /// Bare package name resolved against the default input
    Name(String),
}

impl PackageSpec {
    /// The package name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Detailed { name, .. } => name,
            Self::Name(name) => name,
        }
    }

    /// The explicitly requested input, if any.
    #[must_use]
    pub fn input(&self) -> Option<&str> {
        match self {
            Self::Detailed { input, .. } => input.as_deref(),
            Self::Name(_) => None,
        }
    }
}

/// An exported variable value: a literal string or a value derived from a
/// resolved package's installation path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EnvValue {
    /// Derived form (must come first for serde untagged to try the table
    /// shape before the plain string)
    FromPackage(PackageBinding),
    /// A literal string exported as-is
    Literal(String),
}

/// A variable binding derived from a resolved package path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PackageBinding {
    /// Package whose installation path provides the value
    pub package: String,
    /// Input to resolve against; the default input when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// Path appended below the resolved installation path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subpath: Option<String>,
}

impl Descriptor {
    /// Parse a descriptor from TOML text and validate it.
    pub fn from_toml(text: &str) -> Result<Self> {
        let descriptor: Self = toml::from_str(text)
            .map_err(|e| Error::configuration(format!("invalid descriptor: {e}")))?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Load and validate a descriptor from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::io(e, Some(path.to_path_buf()), "read descriptor"))?;
        Self::from_toml(&text)
    }

    /// The input used for unqualified package references.
    pub fn default_input(&self) -> Result<&str> {
        if let Some(name) = self.shell.input.as_deref() {
            return Ok(name);
        }
        if self.inputs.len() == 1 {
            // Sole input doubles as the default
            return Ok(self
                .inputs
                .keys()
                .next()
                .map(String::as_str)
                .unwrap_or_default());
        }
        Err(Error::configuration(
            "multiple inputs declared; set `shell.input` to pick the default",
        ))
    }

    /// The systems this descriptor supports, falling back to
    /// [`System::defaults`] when none are declared.
    #[must_use]
    pub fn supported_systems(&self) -> Vec<System> {
        if self.systems.is_empty() {
            System::defaults().to_vec()
        } else {
            self.systems.clone()
        }
    }

    /// Whether the given system is in the supported set.
    #[must_use]
    pub fn supports(&self, system: &System) -> bool {
        self.supported_systems().contains(system)
    }

    /// The declared tool references as a set: package name mapped to the
    /// input it resolves against. Duplicates collapse; ordering follows the
    /// package name, never the declaration order.
    pub fn package_set(&self) -> Result<BTreeMap<String, String>> {
        let mut set = BTreeMap::new();
        for spec in &self.shell.packages {
            let input = match spec.input() {
                Some(name) => name,
                None => self.default_input()?,
            };
            set.insert(spec.name().to_string(), input.to_string());
        }
        Ok(set)
    }

    /// Validate the descriptor beyond what the serde model enforces.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(Error::configuration("no inputs declared"));
        }

        for (name, locator) in &self.inputs {
            if name.is_empty() {
                return Err(Error::configuration("input names must be non-empty"));
            }
            if locator.is_empty() {
                return Err(Error::configuration(format!(
                    "input `{name}` has an empty locator"
                )));
            }
        }

        if let Some(input) = self.shell.input.as_deref() {
            self.require_input(input, "shell.input")?;
        }

        for spec in &self.shell.packages {
            if spec.name().is_empty() {
                return Err(Error::configuration("package names must be non-empty"));
            }
            if let Some(input) = spec.input() {
                self.require_input(input, spec.name())?;
            } else {
                // Forces the ambiguity error early when no default exists
                self.default_input()?;
            }
        }

        for (key, value) in &self.env {
            if !is_valid_var_name(key) {
                return Err(Error::configuration(format!(
                    "invalid environment variable name `{key}`"
                )));
            }
            if let EnvValue::FromPackage(binding) = value {
                if binding.package.is_empty() {
                    return Err(Error::configuration(format!(
                        "env var `{key}` references an empty package name"
                    )));
                }
                match binding.input.as_deref() {
                    Some(input) => self.require_input(input, key)?,
                    None => {
                        self.default_input()?;
                    }
                }
            }
        }

        Ok(())
    }

    fn require_input(&self, input: &str, referenced_by: &str) -> Result<()> {
        if self.inputs.contains_key(input) {
            Ok(())
        } else {
            Err(Error::configuration(format!(
                "`{referenced_by}` references undeclared input `{input}`"
            )))
        }
    }
}

/// Search upward from `start` for a [`DESCRIPTOR_FILE`].
#[must_use]
pub fn find_descriptor(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(DESCRIPTOR_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

fn is_valid_var_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_uppercase() || first == '_')
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
