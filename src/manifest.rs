//! Typed view of the subset of `package.json` the audit needs.

use crate::types::InstallHook;
use serde::Deserialize;

/// The fields of a package manifest relevant to the install-script check.
/// Everything else in the document is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    /// Declared package name, absent in some private/placeholder manifests.
    pub name: Option<String>,
    /// Lifecycle scripts block. `null` and missing both mean no scripts.
    #[serde(default)]
    pub scripts: Option<Scripts>,
}

/// The three lifecycle hooks that execute code at install time. Other
/// script entries (`build`, `test`, ...) never run during installation and
/// are not deserialized.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scripts {
    pub preinstall: Option<String>,
    pub install: Option<String>,
    pub postinstall: Option<String>,
}

impl Manifest {
    /// Parse a manifest from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Install hooks the manifest declares with a non-empty invocation.
    /// A hook set to the empty string is inert and treated as absent.
    pub fn install_hooks(&self) -> Vec<InstallHook> {
        let Some(scripts) = &self.scripts else {
            return Vec::new();
        };

        let declared = [
            (InstallHook::Preinstall, &scripts.preinstall),
            (InstallHook::Install, &scripts.install),
            (InstallHook::Postinstall, &scripts.postinstall),
        ];

        declared
            .into_iter()
            .filter(|(_, cmd)| cmd.as_deref().is_some_and(|c| !c.is_empty()))
            .map(|(hook, _)| hook)
            .collect()
    }

    /// The sole business rule: does this package run code at install time?
    pub fn has_install_scripts(&self) -> bool {
        !self.install_hooks().is_empty()
    }
}
