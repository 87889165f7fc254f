// src/workspace.rs
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::errors::Result;

pub const SOURCE_FILE_NAME: &str = "input.v";
pub const BINARY_FILE_NAME: &str = "output.out";

/// A request-scoped scratch directory.
///
/// The directory is removed when the workspace is released or dropped,
/// whichever happens first. Removal is best-effort: failures are logged and
/// never reported to the caller.
#[derive(Debug)]
pub struct Workspace {
    dir: Option<TempDir>,
    root: PathBuf,
    source_path: PathBuf,
    binary_path: PathBuf,
}

impl Workspace {
    /// Creates a fresh, empty, uniquely named directory under `parent`,
    /// or under the system temp dir when `parent` is `None`.
    pub fn acquire(parent: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("verilog-run-");
        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };

        let root = dir.path().to_path_buf();
        log::debug!("Acquired workspace {}", root.display());

        Ok(Self {
            source_path: root.join(SOURCE_FILE_NAME),
            binary_path: root.join(BINARY_FILE_NAME),
            root,
            dir: Some(dir),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Writes `code` verbatim to the workspace's source file.
    pub async fn write_source(&self, code: &str) -> Result<PathBuf> {
        tokio::fs::write(&self.source_path, code).await?;
        log::info!("Saved code to {}", self.source_path.display());
        Ok(self.source_path.clone())
    }

    /// Removes the directory and everything in it.
    pub fn release(mut self) {
        if let Some(dir) = self.dir.take() {
            remove(dir);
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            remove(dir);
        }
    }
}

fn remove(dir: TempDir) {
    let path = dir.path().to_path_buf();
    match dir.close() {
        Ok(()) => log::debug!("Removed workspace {}", path.display()),
        Err(e) => log::warn!("Failed to remove workspace {}: {}", path.display(), e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RunnerError;

    #[test]
    fn test_acquire_creates_unique_empty_dirs() {
        let parent = TempDir::new().unwrap();
        let a = Workspace::acquire(Some(parent.path())).unwrap();
        let b = Workspace::acquire(Some(parent.path())).unwrap();

        assert_ne!(a.root(), b.root());
        assert!(a.root().is_dir());
        assert_eq!(std::fs::read_dir(a.root()).unwrap().count(), 0);
        assert_eq!(a.source_path(), a.root().join("input.v"));
        assert_eq!(a.binary_path(), a.root().join("output.out"));
    }

    #[tokio::test]
    async fn test_write_source_is_verbatim() {
        let ws = Workspace::acquire(None).unwrap();
        let code = "module hello;\ninitial $display(\"Hi \u{263A}\");\nendmodule\n";

        let path = ws.write_source(code).await.unwrap();

        assert_eq!(path, ws.source_path());
        assert_eq!(std::fs::read_to_string(path).unwrap(), code);
    }

    #[tokio::test]
    async fn test_release_removes_directory_with_contents() {
        let ws = Workspace::acquire(None).unwrap();
        ws.write_source("module m; endmodule").await.unwrap();
        std::fs::write(ws.binary_path(), b"binary").unwrap();
        let root = ws.root().to_path_buf();

        ws.release();

        assert!(!root.exists());
    }

    #[test]
    fn test_drop_removes_directory() {
        let root = {
            let ws = Workspace::acquire(None).unwrap();
            ws.root().to_path_buf()
        };
        assert!(!root.exists());
    }

    #[test]
    fn test_release_tolerates_missing_directory() {
        let ws = Workspace::acquire(None).unwrap();
        std::fs::remove_dir_all(ws.root()).unwrap();
        ws.release();
    }

    #[test]
    fn test_acquire_in_missing_parent_fails() {
        let parent = TempDir::new().unwrap();
        let missing = parent.path().join("does-not-exist");

        let result = Workspace::acquire(Some(&missing));

        assert!(matches!(result, Err(RunnerError::Io(_))));
    }

    #[tokio::test]
    async fn test_write_source_fails_when_directory_is_gone() {
        let ws = Workspace::acquire(None).unwrap();
        std::fs::remove_dir_all(ws.root()).unwrap();

        let result = ws.write_source("module m; endmodule").await;

        assert!(matches!(result, Err(RunnerError::Io(_))));
    }
}
