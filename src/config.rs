//! Configuration handling for the auditor.

use clap::Parser;
use std::path::PathBuf;

/// Audit a dependency cache for packages declaring lifecycle install
/// scripts (`preinstall`, `install`, `postinstall`).
///
/// With no arguments, scans the current directory: `.yarn/cache` if it
/// exists, otherwise `node_modules`.
#[derive(Parser, Debug, Clone)]
#[command(name = "hookscan")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Project directory to audit
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Enable verbose output (per-package hook details, debug logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress progress output; findings and errors only
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Emit a structured JSON report instead of one finding per line
    #[arg(long)]
    pub json: bool,

    /// Number of packages to examine concurrently
    #[arg(long, default_value = "10")]
    pub batch_size: usize,

    /// Path to the unzip executable (defaults to `unzip` on PATH)
    #[arg(long, env = "HOOKSCAN_UNZIP")]
    pub unzip_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            verbose: false,
            quiet: false,
            json: false,
            batch_size: crate::batch::DEFAULT_BATCH_SIZE,
            unzip_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_clap_defaults() {
        let parsed = Config::parse_from(["hookscan"]);
        let default = Config::default();
        assert_eq!(parsed.root, default.root);
        assert_eq!(parsed.batch_size, default.batch_size);
        assert_eq!(parsed.verbose, default.verbose);
        assert_eq!(parsed.json, default.json);
    }

    #[test]
    fn test_flag_parsing() {
        let config = Config::parse_from([
            "hookscan",
            "/some/project",
            "--json",
            "--batch-size",
            "4",
        ]);
        assert_eq!(config.root, PathBuf::from("/some/project"));
        assert!(config.json);
        assert_eq!(config.batch_size, 4);
    }
}
