//! Ledger domain errors

use std::io;
use std::path::PathBuf;

use core_kernel::MoneyError;
use thiserror::Error;

use crate::category::Section;

/// Errors that can occur in the ledger domain
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The persisted financial document does not exist
    #[error("Financial document not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    /// The document is not valid JSON or lacks a required list
    #[error("Malformed financial document: {0}")]
    MalformedDocument(#[from] serde_json::Error),

    /// A category field that should hold a number does not
    #[error("Invalid amount in category '{label}': {reason}")]
    InvalidAmount {
        label: String,
        reason: String,
    },

    /// No category matched a selector (strict mode only)
    #[error("Category not found in {section}: {selector}")]
    CategoryNotFound {
        section: Section,
        selector: String,
    },

    /// A sale or total does not fit the decimal range
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing the document failed; the previous file is left in place
    #[error("Failed to persist document to {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Any other I/O failure (audit log, operator output, reads)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl LedgerError {
    pub fn invalid_amount(label: impl Into<String>, reason: impl Into<String>) -> Self {
        LedgerError::InvalidAmount {
            label: label.into(),
            reason: reason.into(),
        }
    }
}
