//! Document persistence
//!
//! The engine talks to storage through [`DocumentStore`]. The file-backed
//! store writes the whole document on every save, to a sibling temp file
//! that is then renamed over the target, so an interrupted write leaves the
//! previous document intact.

use std::cell::{Cell, RefCell};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::FinancialDocument;
use crate::error::LedgerError;

/// Storage for the single financial document
///
/// Implementations assume a single writer; nothing here guards against two
/// engines sharing one location.
pub trait DocumentStore {
    /// Loads the document
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` if nothing is stored yet
    /// - `MalformedDocument` if the stored content cannot be parsed
    fn load(&self) -> Result<FinancialDocument, LedgerError>;

    /// Replaces the stored document
    fn save(&self, document: &FinancialDocument) -> Result<(), LedgerError>;

    /// Human-readable location, for logs and reports
    fn location(&self) -> String;
}

/// Pretty-printed JSON file on the local filesystem
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name: OsString = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("document"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persist_error(&self, source: std::io::Error) -> LedgerError {
        LedgerError::Persist {
            path: self.path.clone(),
            source,
        }
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<FinancialDocument, LedgerError> {
        if !self.path.exists() {
            return Err(LedgerError::DocumentNotFound(self.path.clone()));
        }

        let text = fs::read_to_string(&self.path)?;
        let document = FinancialDocument::from_json(&text)?;
        debug!(path = %self.path.display(), bytes = text.len(), "Loaded financial document");
        Ok(document)
    }

    fn save(&self, document: &FinancialDocument) -> Result<(), LedgerError> {
        let json = document.to_json_pretty()?;
        let tmp_path = self.temp_path();

        {
            let mut file = File::create(&tmp_path).map_err(|e| self.persist_error(e))?;
            file.write_all(json.as_bytes()).map_err(|e| self.persist_error(e))?;
            file.sync_all().map_err(|e| self.persist_error(e))?;
        }
        fs::rename(&tmp_path, &self.path).map_err(|e| self.persist_error(e))?;

        debug!(path = %self.path.display(), bytes = json.len(), "Persisted financial document");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-process store, mainly for tests and embedding
///
/// Holds the document as the JSON text a file store would have written, so
/// saving and loading go through the same serialization path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    content: RefCell<Option<String>>,
    saves: Cell<usize>,
}

impl MemoryStore {
    /// Creates an empty store; loading from it fails with `DocumentNotFound`
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding raw JSON text
    pub fn with_json(json: impl Into<String>) -> Self {
        let store = Self::new();
        *store.content.borrow_mut() = Some(json.into());
        store
    }

    /// The stored JSON text, if any
    pub fn json(&self) -> Option<String> {
        self.content.borrow().clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<FinancialDocument, LedgerError> {
        match self.content.borrow().as_deref() {
            Some(json) => FinancialDocument::from_json(json),
            None => Err(LedgerError::DocumentNotFound(PathBuf::from(self.location()))),
        }
    }

    fn save(&self, document: &FinancialDocument) -> Result<(), LedgerError> {
        *self.content.borrow_mut() = Some(document.to_json_pretty()?);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
