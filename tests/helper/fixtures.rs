//! Manifest fixtures on disk

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A temporary directory holding requirements files
pub struct ManifestDir {
    dir: TempDir,
}

impl ManifestDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Write `content` to `name` (which may contain subdirectories)
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
