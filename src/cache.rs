//! Cache root selection: which dependency-cache layout does this project
//! actually have on disk?

use std::path::{Path, PathBuf};

/// Yarn Plug'n'Play archive cache, relative to the project root.
pub const YARN_CACHE_DIR: &str = ".yarn/cache";

/// Extracted dependency tree, relative to the project root.
pub const NODE_MODULES_DIR: &str = "node_modules";

/// The dependency cache a scan runs against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheRoot {
    /// `.yarn/cache` full of `.zip` archives.
    YarnCache(PathBuf),
    /// An extracted `node_modules` tree.
    NodeModules(PathBuf),
}

impl CacheRoot {
    /// Pick the cache layout for a project directory. The archive cache is
    /// checked first; that ordering is a compatibility guarantee, not a
    /// preference.
    pub fn detect(project_root: &Path) -> Option<Self> {
        let yarn_cache = project_root.join(YARN_CACHE_DIR);
        if yarn_cache.is_dir() {
            return Some(CacheRoot::YarnCache(yarn_cache));
        }

        let node_modules = project_root.join(NODE_MODULES_DIR);
        if node_modules.is_dir() {
            return Some(CacheRoot::NodeModules(node_modules));
        }

        None
    }

    /// The directory the scan will read.
    pub fn path(&self) -> &Path {
        match self {
            CacheRoot::YarnCache(p) | CacheRoot::NodeModules(p) => p,
        }
    }
}
