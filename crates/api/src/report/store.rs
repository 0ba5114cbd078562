use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::ReportError;

/// Persists rendered reports under a human-readable file name.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Write `bytes` under `file_name`, replacing any previous export, and
    /// return where it was written.
    async fn put(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ReportError>;
}

/// Writes reports into a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalReportStore {
    root: PathBuf,
}

impl LocalReportStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ReportStore for LocalReportStore {
    async fn put(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ReportError> {
        let is_single_component = Path::new(file_name)
            .file_name()
            .is_some_and(|n| n == file_name);
        if file_name.is_empty() || !is_single_component {
            return Err(ReportError::InvalidName(file_name.to_string()));
        }

        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(file_name);
        tokio::fs::write(&path, bytes).await?;

        tracing::info!(path = %path.display(), size = bytes.len(), "Report written");
        Ok(path)
    }
}
