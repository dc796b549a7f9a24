//! Console output: findings on stdout, everything else on stderr.

use crate::types::{Finding, ScanMode, ScanReport};
use colored::Colorize;

/// Output handler. Findings go to the primary stream (stdout) one per
/// line; progress, warnings and errors go to the diagnostic stream
/// (stderr) and may be discarded by callers.
pub struct ConsoleOutput {
    verbose: bool,
    json_mode: bool,
    quiet: bool,
}

impl ConsoleOutput {
    pub fn new(verbose: bool, json_mode: bool, quiet: bool) -> Self {
        Self {
            verbose,
            json_mode,
            quiet,
        }
    }

    /// Announce which cache layout is being scanned.
    pub fn print_scan_start(&self, mode: ScanMode) {
        if self.json_mode || self.quiet {
            return;
        }

        let message = match mode {
            ScanMode::YarnCache => "Scanning Yarn PnP cache...",
            ScanMode::NodeModules => "Scanning node_modules...",
        };
        eprintln!("{}", message.cyan());
    }

    /// Per-unit progress line.
    pub fn print_checking(&self, label: &str) {
        if self.json_mode || self.quiet {
            return;
        }

        eprintln!("{}", format!("Checking {}", label).dimmed());
    }

    /// Emit a finding to the primary stream the moment it is made.
    pub fn print_finding(&self, finding: &Finding) {
        if self.json_mode {
            return;
        }

        println!("{}", finding.package);

        if self.verbose {
            let hooks: Vec<String> = finding.hooks.iter().map(|h| h.to_string()).collect();
            eprintln!(
                "{}",
                format!("  {} declares: {}", finding.source, hooks.join(", ")).dimmed()
            );
        }
    }

    /// Recoverable per-unit error. Never suppressed.
    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", "[ERROR]".red().bold(), message);
    }

    /// Traversal warning. Never suppressed.
    pub fn print_warn(&self, message: &str) {
        eprintln!("{} {}", "[WARN]".yellow(), message);
    }

    /// End-of-scan summary: JSON report in json mode, a short stderr
    /// recap otherwise.
    pub fn print_summary(&self, report: &ScanReport) {
        if self.json_mode {
            if let Ok(json) = serde_json::to_string_pretty(report) {
                println!("{}", json);
            }
            return;
        }

        if self.quiet && report.findings.is_empty() {
            return;
        }

        eprintln!();
        if report.findings.is_empty() {
            eprintln!(
                "{}",
                format!(
                    "No install scripts found across {} packages ({:.2}s)",
                    report.scanned, report.duration_secs
                )
                .green()
            );
        } else {
            eprintln!(
                "{}",
                format!(
                    "{} of {} packages declare install scripts ({:.2}s)",
                    report.findings.len(),
                    report.scanned,
                    report.duration_secs
                )
                .red()
                .bold()
            );
        }

        if !report.errors.is_empty() {
            eprintln!("{}", format!("{} errors:", report.errors.len()).yellow());
            for error in &report.errors {
                eprintln!("  - {}", error.dimmed());
            }
        }
    }
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self::new(false, false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InstallHook;

    #[test]
    fn test_console_output_creation() {
        let output = ConsoleOutput::new(true, false, false);
        assert!(output.verbose);
        assert!(!output.json_mode);
        assert!(!output.quiet);
    }

    #[test]
    fn test_print_paths_do_not_panic() {
        let output = ConsoleOutput::new(true, false, false);
        output.print_scan_start(ScanMode::YarnCache);
        output.print_checking("lodash-npm-4.17.21.zip");
        output.print_finding(&Finding {
            package: "evil-pkg".to_string(),
            source: ".yarn/cache/evil.zip".to_string(),
            hooks: vec![InstallHook::Postinstall],
        });
        output.print_summary(&ScanReport {
            mode: ScanMode::YarnCache,
            scanned: 1,
            findings: vec![],
            duration_secs: 0.01,
            errors: vec!["boom".to_string()],
        });
    }
}
