//! Target system identification.
//!
//! Systems are rendered the way the package resolver names them: an
//! `<arch>-<os>` pair such as `x86_64-linux` or `aarch64-darwin`. The
//! descriptor never authors a system per tool; the identifier is supplied by
//! the invoking environment and the whole descriptor is evaluated once per
//! identifier.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

/// Operating system half of a system identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Os {
    /// Linux
    Linux,
    /// macOS
    Darwin,
}

impl Os {
    /// Get the current OS.
    #[must_use]
    pub fn current() -> Self {
        #[cfg(target_os = "macos")]
        return Self::Darwin;
        #[cfg(target_os = "linux")]
        return Self::Linux;
        #[cfg(not(any(target_os = "macos", target_os = "linux")))]
        compile_error!("Unsupported OS");
    }

    /// Parse from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "linux" => Some(Self::Linux),
            "darwin" | "macos" => Some(Self::Darwin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Darwin => write!(f, "darwin"),
        }
    }
}

/// CPU architecture half of a system identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Arch {
    /// 64-bit x86
    X86_64,
    /// 64-bit ARM
    Aarch64,
}

impl Arch {
    /// Get the current architecture.
    #[must_use]
    pub fn current() -> Self {
        #[cfg(target_arch = "x86_64")]
        return Self::X86_64;
        #[cfg(target_arch = "aarch64")]
        return Self::Aarch64;
        #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
        compile_error!("Unsupported architecture");
    }

    /// Parse from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "x86_64" | "amd64" | "x64" => Some(Self::X86_64),
            "aarch64" | "arm64" => Some(Self::Aarch64),
            _ => None,
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X86_64 => write!(f, "x86_64"),
            Self::Aarch64 => write!(f, "aarch64"),
        }
    }
}

/// A target system identifier combining architecture and OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct System {
    /// CPU architecture
    pub arch: Arch,
    /// Operating system
    pub os: Os,
}

impl System {
    /// Create a new system identifier.
    #[must_use]
    pub fn new(arch: Arch, os: Os) -> Self {
        Self { arch, os }
    }

    /// Get the current host system.
    #[must_use]
    pub fn current() -> Self {
        Self {
            arch: Arch::current(),
            os: Os::current(),
        }
    }

    /// Parse from a string like `x86_64-linux`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (arch, os) = s.split_once('-')?;
        Some(Self {
            arch: Arch::parse(arch)?,
            os: Os::parse(os)?,
        })
    }

    /// The default supported set: Linux and Darwin on both 64-bit
    /// architectures.
    #[must_use]
    pub fn defaults() -> [Self; 4] {
        [
            Self::new(Arch::X86_64, Os::Linux),
            Self::new(Arch::Aarch64, Os::Linux),
            Self::new(Arch::X86_64, Os::Darwin),
            Self::new(Arch::Aarch64, Os::Darwin),
        ]
    }
}

impl std::fmt::Display for System {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.arch, self.os)
    }
}

// Systems appear in the descriptor as plain strings, so serde goes through
// Display/parse rather than a derived struct form.
impl Serialize for System {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for System {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s)
            .ok_or_else(|| de::Error::custom(format!("invalid system identifier: `{s}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_parse() {
        let s = System::parse("x86_64-linux").unwrap();
        assert_eq!(s.arch, Arch::X86_64);
        assert_eq!(s.os, Os::Linux);

        let s = System::parse("aarch64-darwin").unwrap();
        assert_eq!(s.arch, Arch::Aarch64);
        assert_eq!(s.os, Os::Darwin);

        assert!(System::parse("invalid").is_none());
    }

    #[test]
    fn test_system_parse_edge_cases() {
        assert!(System::parse("").is_none());
        assert!(System::parse("x86_64").is_none());
        assert!(System::parse("x86_64-windows").is_none());
        assert!(System::parse("mips-linux").is_none());
        // The OS half takes the remainder, so extra segments fail on OS parse
        assert!(System::parse("x86_64-linux-gnu").is_none());
    }

    #[test]
    fn test_system_display_all_combinations() {
        assert_eq!(
            System::new(Arch::X86_64, Os::Linux).to_string(),
            "x86_64-linux"
        );
        assert_eq!(
            System::new(Arch::Aarch64, Os::Linux).to_string(),
            "aarch64-linux"
        );
        assert_eq!(
            System::new(Arch::X86_64, Os::Darwin).to_string(),
            "x86_64-darwin"
        );
        assert_eq!(
            System::new(Arch::Aarch64, Os::Darwin).to_string(),
            "aarch64-darwin"
        );
    }

    #[test]
    fn test_system_roundtrip_through_display() {
        for system in System::defaults() {
            assert_eq!(System::parse(&system.to_string()), Some(system));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(
            System::parse("arm64-macos"),
            Some(System::new(Arch::Aarch64, Os::Darwin))
        );
        assert_eq!(
            System::parse("amd64-linux"),
            Some(System::new(Arch::X86_64, Os::Linux))
        );
    }

    #[test]
    fn test_system_current() {
        let s = System::current();
        assert!(matches!(s.os, Os::Linux | Os::Darwin));
        assert!(matches!(s.arch, Arch::X86_64 | Arch::Aarch64));
    }

    #[test]
    fn test_defaults_cover_four_systems() {
        let defaults = System::defaults();
        assert_eq!(defaults.len(), 4);
        let unique: std::collections::BTreeSet<_> = defaults.iter().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_serde_string_form() {
        let system: System = serde_json::from_str("\"x86_64-linux\"").unwrap();
        assert_eq!(system, System::new(Arch::X86_64, Os::Linux));
        assert_eq!(
            serde_json::to_string(&system).unwrap(),
            "\"x86_64-linux\""
        );

        let err = serde_json::from_str::<System>("\"windows-x86\"");
        assert!(err.is_err());
    }
}
