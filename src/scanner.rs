//! Main scanner orchestrating the two cache pipelines.
//!
//! One pipeline per cache layout: the archive scanner walks a Yarn PnP zip
//! cache through the external archive tool, the directory scanner walks an
//! extracted `node_modules` tree. Both resolve each unit of work (one
//! archive, one package directory) to a terminal [`Outcome`] in isolation;
//! a failing unit never affects its siblings.

use crate::archive::{ArchiveTool, UnzipTool};
use crate::batch::run_batched;
use crate::cache::{CacheRoot, NODE_MODULES_DIR};
use crate::config::Config;
use crate::console::ConsoleOutput;
use crate::manifest::Manifest;
use crate::types::{Finding, Outcome, Result, ScanMode, ScanReport};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Descent bound along nested-cache branches, guarding against
/// pathological trees. Only `node_modules` nesting counts toward it.
const MAX_NESTED_DEPTH: usize = 20;

const MANIFEST_FILE: &str = "package.json";

/// Install-script auditor for one project directory.
pub struct Scanner {
    config: Config,
    archive_tool: Arc<dyn ArchiveTool>,
    console: ConsoleOutput,
}

impl Scanner {
    /// Create a scanner with the real `unzip`-backed archive tool.
    pub fn new(config: Config) -> Self {
        let archive_tool = Arc::new(UnzipTool::new(config.unzip_path.clone()));
        let console = ConsoleOutput::new(config.verbose, config.json, config.quiet);
        Self {
            config,
            archive_tool,
            console,
        }
    }

    /// Swap in a different archive tool (used by tests to avoid spawning
    /// the real binary).
    pub fn with_archive_tool(mut self, tool: Arc<dyn ArchiveTool>) -> Self {
        self.archive_tool = tool;
        self
    }

    /// Run the scan for the detected cache root. Findings are streamed to
    /// stdout as they are made; the returned report aggregates them along
    /// with per-unit errors.
    pub async fn scan(&self, cache: CacheRoot) -> Result<ScanReport> {
        let start = Instant::now();

        match cache {
            CacheRoot::YarnCache(dir) => {
                self.console.print_scan_start(ScanMode::YarnCache);
                self.scan_yarn_cache(&dir, start).await
            }
            CacheRoot::NodeModules(dir) => {
                self.console.print_scan_start(ScanMode::NodeModules);
                self.scan_node_modules(&dir, start).await
            }
        }
    }

    /// Archive pipeline: every `.zip` in the cache directory, in batches.
    async fn scan_yarn_cache(&self, cache_dir: &Path, start: Instant) -> Result<ScanReport> {
        let mut archives: Vec<PathBuf> = fs::read_dir(cache_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with(".zip"))
            })
            .collect();

        // Sort for reproducible output; readdir order is arbitrary.
        archives.sort();

        let scanned = archives.len();
        debug!("found {} archives in {}", scanned, cache_dir.display());

        let outcomes = run_batched(archives, self.config.batch_size, |zip| {
            self.process_archive(zip)
        })
        .await;

        Ok(self.build_report(ScanMode::YarnCache, scanned, outcomes, start))
    }

    /// One archive to one terminal outcome. Every failure is logged here
    /// and contained here.
    async fn process_archive(&self, zip: PathBuf) -> Outcome {
        let label = zip
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| zip.display().to_string());
        self.console.print_checking(&label);

        let listing = match self.archive_tool.list_entries(&zip).await {
            Ok(listing) => listing,
            Err(e) => {
                let message = format!("failed to process {}: {}", zip.display(), e);
                self.console.print_error(&message);
                return Outcome::Failed(message);
            }
        };

        let Some(entry) = select_manifest_entry(&listing) else {
            // No nested manifest at all; not an error.
            debug!("no nested {} in {}", MANIFEST_FILE, zip.display());
            return Outcome::Skipped;
        };

        let manifest = match self.read_archive_manifest(&zip, &entry).await {
            Ok(manifest) => manifest,
            Err(e) => {
                let message = format!("failed to parse {} for {}: {}", entry, zip.display(), e);
                self.console.print_error(&message);
                return Outcome::Failed(message);
            }
        };

        let hooks = manifest.install_hooks();
        if hooks.is_empty() {
            return Outcome::Skipped;
        }

        let finding = Finding {
            package: manifest
                .name
                .unwrap_or_else(|| zip.display().to_string()),
            source: zip.display().to_string(),
            hooks,
        };
        self.console.print_finding(&finding);
        Outcome::Finding(finding)
    }

    async fn read_archive_manifest(&self, zip: &Path, entry: &str) -> Result<Manifest> {
        let bytes = self.archive_tool.extract_entry(zip, entry).await?;
        Ok(Manifest::from_slice(&bytes)?)
    }

    /// Directory pipeline: collect every candidate package directory, then
    /// examine the manifests in batches.
    async fn scan_node_modules(&self, modules_root: &Path, start: Instant) -> Result<ScanReport> {
        let mut candidates = Vec::new();
        self.walk_dir(modules_root, 0, &mut candidates);
        candidates.sort();

        let scanned = candidates.len();
        debug!(
            "found {} candidate packages under {}",
            scanned,
            modules_root.display()
        );

        let outcomes = run_batched(candidates, self.config.batch_size, |dir| {
            self.process_package_dir(dir, modules_root)
        })
        .await;

        Ok(self.build_report(ScanMode::NodeModules, scanned, outcomes, start))
    }

    /// Recursive traversal yielding directories that directly contain a
    /// manifest. Symlinks are treated as leaves, never followed. The depth
    /// counter only moves when descending into a nested `node_modules`, so
    /// deeply nested caches stop at [`MAX_NESTED_DEPTH`] while ordinary
    /// package subtrees (scoped packages, vendored sources) are always
    /// walked.
    fn walk_dir(&self, dir: &Path, depth: usize, out: &mut Vec<PathBuf>) {
        if depth > MAX_NESTED_DEPTH {
            return;
        }

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                self.console
                    .print_warn(&format!("could not read directory {}: {}", dir.display(), e));
                return;
            }
        };

        for entry in entries.flatten() {
            // file_type() does not traverse symlinks, so a link to a
            // directory shows up as a symlink here and gets skipped.
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_symlink() || !file_type.is_dir() {
                continue;
            }

            let path = entry.path();
            if path.join(MANIFEST_FILE).exists() {
                out.push(path.clone());
            }

            let next_depth = if entry.file_name() == NODE_MODULES_DIR {
                depth + 1
            } else {
                depth
            };
            self.walk_dir(&path, next_depth, out);
        }
    }

    /// One candidate package directory to one terminal outcome.
    async fn process_package_dir(&self, pkg_dir: PathBuf, modules_root: &Path) -> Outcome {
        let relative = pkg_dir
            .strip_prefix(modules_root)
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| pkg_dir.display().to_string());
        self.console.print_checking(&relative);

        let manifest_path = pkg_dir.join(MANIFEST_FILE);
        let manifest = match self.read_dir_manifest(&manifest_path).await {
            Ok(manifest) => manifest,
            Err(e) => {
                let message = format!("failed to process {}: {}", manifest_path.display(), e);
                self.console.print_error(&message);
                return Outcome::Failed(message);
            }
        };

        let hooks = manifest.install_hooks();
        if hooks.is_empty() {
            return Outcome::Skipped;
        }

        let finding = Finding {
            package: manifest.name.unwrap_or_else(|| relative.clone()),
            source: relative,
            hooks,
        };
        self.console.print_finding(&finding);
        Outcome::Finding(finding)
    }

    async fn read_dir_manifest(&self, manifest_path: &Path) -> Result<Manifest> {
        let bytes = tokio::fs::read(manifest_path).await?;
        Ok(Manifest::from_slice(&bytes)?)
    }

    fn build_report(
        &self,
        mode: ScanMode,
        scanned: usize,
        outcomes: Vec<Outcome>,
        start: Instant,
    ) -> ScanReport {
        let mut findings = Vec::new();
        let mut errors = Vec::new();

        for outcome in outcomes {
            match outcome {
                Outcome::Finding(finding) => findings.push(finding),
                Outcome::Skipped => {}
                Outcome::Failed(error) => errors.push(error),
            }
        }

        let report = ScanReport {
            mode,
            scanned,
            findings,
            duration_secs: start.elapsed().as_secs_f64(),
            errors,
        };
        self.console.print_summary(&report);
        report
    }
}

/// Pick the manifest entry closest to the archive root out of a textual
/// file listing. The manifest with the fewest path segments is assumed to
/// belong to the package the archive represents rather than a transitive
/// dependency bundled inside it. Strictly-less-than comparison: ties keep
/// the first-seen entry.
fn select_manifest_entry(listing: &str) -> Option<String> {
    let Ok(re) = Regex::new(r".+(node_modules.*package\.json)") else {
        return None;
    };

    let mut best: Option<String> = None;
    let mut min_depth = usize::MAX;

    for line in listing.lines() {
        let Some(caps) = re.captures(line) else {
            continue;
        };
        let Some(entry) = caps.get(1) else {
            continue;
        };

        let depth = entry.as_str().split('/').count();
        if depth < min_depth {
            min_depth = depth;
            best = Some(entry.as_str().trim().to_string());
        }
    }

    best
}
