//! Core types and errors for the install-script auditor.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during a scan.
#[derive(Error, Debug)]
pub enum HookscanError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("archive tool failed: {0}")]
    ArchiveTool(String),

    #[error("invalid UTF-8 in {0}")]
    InvalidUtf8(String),
}

pub type Result<T> = std::result::Result<T, HookscanError>;

/// Which cache layout a scan ran against.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// Yarn Plug'n'Play zip archive cache (`.yarn/cache`).
    YarnCache,
    /// Extracted dependency tree (`node_modules`).
    NodeModules,
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanMode::YarnCache => write!(f, "yarn-cache"),
            ScanMode::NodeModules => write!(f, "node_modules"),
        }
    }
}

/// A lifecycle hook that runs during package installation.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InstallHook {
    Preinstall,
    Install,
    Postinstall,
}

impl fmt::Display for InstallHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallHook::Preinstall => write!(f, "preinstall"),
            InstallHook::Install => write!(f, "install"),
            InstallHook::Postinstall => write!(f, "postinstall"),
        }
    }
}

/// A package found to declare at least one install script.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Finding {
    /// Declared package name, or the source path when the manifest has none.
    pub package: String,
    /// Where the package came from: archive path, or directory relative to
    /// the modules root.
    pub source: String,
    /// Which install hooks the manifest declares.
    pub hooks: Vec<InstallHook>,
}

/// Terminal outcome of one unit of work (one archive or one candidate
/// directory). Every unit resolves to exactly one of these.
#[derive(Debug)]
pub enum Outcome {
    /// The package declares install scripts; its name was emitted.
    Finding(Finding),
    /// Nothing to report (no manifest, or no install scripts).
    Skipped,
    /// A recoverable per-unit failure, already logged.
    Failed(String),
}

/// Complete result of one scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Cache layout that was scanned.
    pub mode: ScanMode,
    /// Number of archives or candidate packages examined.
    pub scanned: usize,
    /// Packages declaring install scripts.
    pub findings: Vec<Finding>,
    /// Scan duration in seconds.
    pub duration_secs: f64,
    /// Per-unit errors encountered (non-fatal).
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_mode_display() {
        assert_eq!(ScanMode::YarnCache.to_string(), "yarn-cache");
        assert_eq!(ScanMode::NodeModules.to_string(), "node_modules");
    }

    #[test]
    fn test_install_hook_serializes_lowercase() {
        let json = serde_json::to_string(&InstallHook::Postinstall).unwrap();
        assert_eq!(json, "\"postinstall\"");
    }
}
