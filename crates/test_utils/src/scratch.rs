//! Scratch Directories
//!
//! File-backed ledger tests each get their own directory under the system
//! temp dir, removed again when the guard is dropped.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use domain_ledger::StorageConfig;

/// A uniquely named temporary directory, deleted on drop
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Creates a fresh empty directory
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("ledger-test-")
            .tempdir()
            .unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `name` inside the directory
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Writes `content` to `name` and returns its path
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Reads `name` back as text
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.join(name)).unwrap()
    }

    /// Storage paths for a document and audit log inside the directory
    pub fn storage(&self) -> StorageConfig {
        StorageConfig {
            document_path: self.join("schema_financeiro.json"),
            audit_log_path: self.join("transacoes.log"),
        }
    }

    /// Names of the files currently in the directory, sorted
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

impl Default for ScratchDir {
    fn default() -> Self {
        Self::new()
    }
}
