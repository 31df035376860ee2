//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! sales ledger test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built documents, configuration and timestamps
//! - `builders`: Builder for financial documents
//! - `scratch`: Self-cleaning temporary directories for file-backed tests
//! - `assertions`: Custom assertion helpers for ledger types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod scratch;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use scratch::*;
pub use assertions::*;
pub use generators::*;
