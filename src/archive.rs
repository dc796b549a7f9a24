//! Archive tool abstraction.
//!
//! The scanner never parses zip files itself; it delegates to an external
//! archive utility through a two-operation interface, so the scanning logic
//! stays testable without the real binary.

use crate::types::{HookscanError, Result};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// External archive utility interface.
#[async_trait]
pub trait ArchiveTool: Send + Sync {
    /// List an archive's internal file table as lines of text.
    async fn list_entries(&self, archive: &Path) -> Result<String>;

    /// Extract a single entry's raw bytes.
    async fn extract_entry(&self, archive: &Path, entry: &str) -> Result<Vec<u8>>;
}

/// `ArchiveTool` backed by the `unzip` binary (`unzip -l` / `unzip -p`).
pub struct UnzipTool {
    executable: PathBuf,
}

impl UnzipTool {
    pub fn new(executable: Option<PathBuf>) -> Self {
        Self {
            executable: executable.unwrap_or_else(|| PathBuf::from("unzip")),
        }
    }

    async fn run(&self, args: Vec<OsString>) -> Result<Vec<u8>> {
        let output = Command::new(&self.executable)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                HookscanError::ArchiveTool(format!(
                    "failed to spawn {}: {}",
                    self.executable.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HookscanError::ArchiveTool(format!(
                "{} exited with {}: {}",
                self.executable.display(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(output.stdout)
    }
}

impl Default for UnzipTool {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl ArchiveTool for UnzipTool {
    async fn list_entries(&self, archive: &Path) -> Result<String> {
        let stdout = self
            .run(vec!["-l".into(), archive.as_os_str().to_owned()])
            .await?;

        String::from_utf8(stdout)
            .map_err(|_| HookscanError::InvalidUtf8(archive.display().to_string()))
    }

    async fn extract_entry(&self, archive: &Path, entry: &str) -> Result<Vec<u8>> {
        self.run(vec![
            "-p".into(),
            archive.as_os_str().to_owned(),
            entry.into(),
        ])
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_executable_is_an_archive_tool_error() {
        let tool = UnzipTool::new(Some(PathBuf::from("/nonexistent/unzip-binary")));
        let err = tool
            .list_entries(Path::new("whatever.zip"))
            .await
            .unwrap_err();
        assert!(matches!(err, HookscanError::ArchiveTool(_)));
    }

    #[test]
    fn test_default_executable_is_unzip() {
        let tool = UnzipTool::default();
        assert_eq!(tool.executable, PathBuf::from("unzip"));
    }
}
