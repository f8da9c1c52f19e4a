//! Scratch directories for sbb-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory tree holding configs and key files.
pub struct TestDir {
    /// Removed on drop.
    root: TempDir,
}

impl TestDir {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Root of the tree.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Makes `rel` (and its parents) and returns it.
    pub fn dir(&self, rel: &str) -> PathBuf {
        let dir = self.root.path().join(rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Writes an API key file at `rel`, newline-terminated like most editors leave it.
    pub fn key_file(&self, rel: &str, key: &str) -> PathBuf {
        let path = self.root.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, format!("{key}\n")).unwrap();
        path
    }

    /// Writes `.sbb.toml` in directory `rel` with `content`.
    pub fn config(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir(rel).join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }
}
