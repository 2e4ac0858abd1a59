use crate::error::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const WORKDIR_PREFIX: &str = "ransomtest_";

/// Scratch directory under the platform temp root. The TempDir is owned, so
/// every exit path removes the tree exactly once: `release` on the normal
/// flow, Drop as the backstop when an error propagates out first.
#[derive(Debug)]
pub struct Workspace {
    path: PathBuf,
    dir: Option<TempDir>,
}

impl Workspace {
    pub fn acquire() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix(WORKDIR_PREFIX).tempdir()?;
        let path = dir.path().to_path_buf();
        tracing::debug!(dir = %path.display(), "workspace acquired");
        Ok(Self {
            path,
            dir: Some(dir),
        })
    }

    /// Stays valid for reporting even after release.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory tree. Best effort; a second call is a no-op.
    pub fn release(&mut self) {
        if let Some(dir) = self.dir.take() {
            match dir.close() {
                Ok(()) => tracing::info!(dir = %self.path.display(), "cleaned up"),
                Err(e) => {
                    tracing::warn!(dir = %self.path.display(), error = %e, "cleanup failed")
                }
            }
        }
    }
}
