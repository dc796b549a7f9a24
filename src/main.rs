//! hookscan - audit npm dependency caches for lifecycle install scripts.
//!
//! CLI entry point.

use clap::Parser;
use hookscan::cache::{NODE_MODULES_DIR, YARN_CACHE_DIR};
use hookscan::{CacheRoot, Config, Scanner};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Set up logging. Everything goes to stderr so the findings stream
    // stays machine-consumable.
    let filter = if config.verbose {
        EnvFilter::new("hookscan=debug,info")
    } else {
        EnvFilter::new("hookscan=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Some(cache) = CacheRoot::detect(&config.root) else {
        eprintln!("No {} or {} directory found", YARN_CACHE_DIR, NODE_MODULES_DIR);
        return ExitCode::FAILURE;
    };

    let scanner = Scanner::new(config);
    match scanner.scan(cache).await {
        // Per-unit failures are already logged and do not affect the exit
        // code; only an uncaught top-level failure does.
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Scan failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
