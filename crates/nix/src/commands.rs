//! Nix CLI command wrappers.
//!
//! A thin abstraction over the `nix` command-line tool: flake-output
//! evaluation, store-path realization, and an availability probe. Failure
//! output is classified so the resolver can tell a missing attribute apart
//! from a collaborator-side fetch failure.

use devshed_core::{Error, Result};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Outcome of evaluating or building a flake output attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrOutcome {
    /// The attribute resolved to a store path.
    Path(PathBuf),
    /// The flake does not provide the requested attribute.
    Missing,
}

/// Evaluate `installable.outPath` without realizing the store path.
///
/// # Errors
///
/// Returns [`Error::SourceFetch`] when the nix command cannot be run or the
/// evaluation fails for a reason other than a missing attribute.
pub async fn eval_out_path(installable: &str) -> Result<AttrOutcome> {
    debug!(%installable, "evaluating flake output");

    let output = Command::new("nix")
        .args(["eval", "--raw", &format!("{installable}.outPath")])
        .output()
        .await
        .map_err(|e| Error::source_fetch(format!("failed to run nix: {e}")))?;

    if output.status.success() {
        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        return Ok(AttrOutcome::Path(PathBuf::from(path)));
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr_signals_missing_attribute(&stderr) {
        return Ok(AttrOutcome::Missing);
    }
    Err(Error::source_fetch(format!(
        "nix eval failed for {installable}: {}",
        stderr.trim()
    )))
}

/// Build `installable` and return its realized store path.
///
/// # Errors
///
/// Returns [`Error::SourceFetch`] when the nix command cannot be run, the
/// build fails for a reason other than a missing attribute, or no output
/// path is reported.
pub async fn build_out_path(installable: &str) -> Result<AttrOutcome> {
    debug!(%installable, "realizing flake output");

    let output = Command::new("nix")
        .args(["build", "--no-link", "--print-out-paths", installable])
        .output()
        .await
        .map_err(|e| Error::source_fetch(format!("failed to run nix: {e}")))?;

    if output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = stdout
            .lines()
            .next()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| {
                Error::source_fetch(format!("nix build reported no output path for {installable}"))
            })?;
        return Ok(AttrOutcome::Path(PathBuf::from(path)));
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr_signals_missing_attribute(&stderr) {
        return Ok(AttrOutcome::Missing);
    }
    Err(Error::source_fetch(format!(
        "nix build failed for {installable}: {}",
        stderr.trim()
    )))
}

/// Check if nix is available with flakes enabled.
pub async fn check_available() -> bool {
    Command::new("nix")
        .args(["flake", "--help"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Whether nix stderr indicates the flake lacks the requested attribute, as
/// opposed to a fetch or evaluation failure.
fn stderr_signals_missing_attribute(stderr: &str) -> bool {
    stderr.contains("does not provide attribute")
        || (stderr.contains("attribute")
            && (stderr.contains("missing") || stderr.contains("not found")))
}
