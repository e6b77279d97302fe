use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A pid file on disk holding this process's id.
#[derive(Debug, Clone)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// Write the current process id to `path`, replacing any previous file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        fs::write(&path, std::process::id().to_string())
            .with_context(|| format!("failed to write pid file {}", path.display()))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best-effort removal.
    pub fn remove(&self) {
        let _ = fs::remove_file(&self.path);
    }
}
