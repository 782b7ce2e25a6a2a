//! Error types for the devshed workspace.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for devshed operations.
///
/// Every failure of a single resolution attempt is terminal: nothing is
/// retried and no partial environment is produced.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Requested target system is not in the descriptor's supported set.
    #[error("unsupported system `{system}`")]
    #[diagnostic(
        code(devshed::system::unsupported),
        help("supported systems: {supported}")
    )]
    UnsupportedSystem {
        /// The system identifier that was requested
        system: String,
        /// Comma-separated list of systems the descriptor supports
        supported: String,
    },

    /// A declared tool reference is absent from the resolved package
    /// collection for the target system.
    #[error("package `{name}` not found in input `{input}` for system `{system}`")]
    #[diagnostic(code(devshed::resolve::package_not_found))]
    UnresolvedPackage {
        /// The package name that could not be resolved
        name: String,
        /// The input the name was resolved against
        input: String,
        /// The target system identifier
        system: String,
    },

    /// Collaborator-originated failure fetching or evaluating an input
    /// source. Propagated opaquely; never retried here.
    #[error("source fetch failed: {message}")]
    #[diagnostic(code(devshed::resolve::source_fetch))]
    SourceFetch {
        /// The error message reported by the resolver
        message: String,
        /// Optional help text
        #[help]
        help: Option<String>,
    },

    /// Descriptor syntax or validation error.
    #[error("configuration error: {message}")]
    #[diagnostic(code(devshed::config::invalid))]
    Configuration {
        /// The error message describing the configuration issue
        message: String,
    },

    /// I/O error with operation context.
    #[error("I/O error during {operation}: {source}")]
    #[diagnostic(code(devshed::io::error))]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// The path where the I/O error occurred, if applicable
        path: Option<Box<std::path::Path>>,
        /// Description of the operation that failed
        operation: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    #[diagnostic(code(devshed::serialization))]
    Serialization {
        /// The error message describing the serialization issue
        message: String,
    },
}

impl Error {
    /// Create an unsupported-system error from the requested identifier and
    /// the supported set.
    pub fn unsupported_system(
        system: impl std::fmt::Display,
        supported: impl IntoIterator<Item = impl std::fmt::Display>,
    ) -> Self {
        Self::UnsupportedSystem {
            system: system.to_string(),
            supported: supported
                .into_iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Create an unresolved-package error naming the offending reference.
    pub fn unresolved_package(
        name: impl Into<String>,
        input: impl Into<String>,
        system: impl std::fmt::Display,
    ) -> Self {
        Self::UnresolvedPackage {
            name: name.into(),
            input: input.into(),
            system: system.to_string(),
        }
    }

    /// Create a source-fetch error with a message.
    pub fn source_fetch(message: impl Into<String>) -> Self {
        Self::SourceFetch {
            message: message.into(),
            help: None,
        }
    }

    /// Create a source-fetch error with a message and help text.
    pub fn source_fetch_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::SourceFetch {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create a configuration error with a message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an I/O error with context.
    pub fn io(source: std::io::Error, path: Option<PathBuf>, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            path: path.map(|p| p.into_boxed_path()),
            operation: operation.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Result type for devshed operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_system_lists_supported_set() {
        let err = Error::unsupported_system("mips-linux", ["x86_64-linux", "aarch64-darwin"]);
        assert_eq!(err.to_string(), "unsupported system `mips-linux`");
        match err {
            Error::UnsupportedSystem { supported, .. } => {
                assert_eq!(supported, "x86_64-linux, aarch64-darwin");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_unresolved_package_names_offending_reference() {
        let err = Error::unresolved_package("foo-lint", "nixpkgs", "x86_64-linux");
        assert_eq!(
            err.to_string(),
            "package `foo-lint` not found in input `nixpkgs` for system `x86_64-linux`"
        );
    }

    #[test]
    fn test_source_fetch_display() {
        let err = Error::source_fetch("connection refused");
        assert_eq!(err.to_string(), "source fetch failed: connection refused");
    }

    #[test]
    fn test_io_error_includes_operation() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::io(io, Some(PathBuf::from("/tmp/devshed.toml")), "read descriptor");
        assert!(err.to_string().contains("read descriptor"));
    }
}
