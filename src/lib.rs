//! hookscan - audit npm dependency caches for lifecycle install scripts.
//!
//! This library scans a project's dependency cache and reports every
//! installed package that declares a `preinstall`, `install` or
//! `postinstall` script, without re-running installation:
//! - Yarn Plug'n'Play caches are audited archive by archive through an
//!   external archive tool
//! - extracted `node_modules` trees are walked directly
//!
//! # Example
//!
//! ```no_run
//! use hookscan::{CacheRoot, Config, Scanner};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = CacheRoot::detect(Path::new(".")).expect("no dependency cache here");
//!     let scanner = Scanner::new(Config::default());
//!     let report = scanner.scan(cache).await.unwrap();
//!     println!("{} packages declare install scripts", report.findings.len());
//! }
//! ```

pub mod archive;
pub mod batch;
pub mod cache;
pub mod config;
pub mod console;
pub mod manifest;
pub mod scanner;
pub mod types;

pub use archive::{ArchiveTool, UnzipTool};
pub use cache::CacheRoot;
pub use config::Config;
pub use manifest::Manifest;
pub use scanner::Scanner;
pub use types::{
    Finding, HookscanError, InstallHook, Outcome, Result, ScanMode, ScanReport,
};
