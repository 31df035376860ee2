//! Core Kernel - Foundational types for the sales ledger
//!
//! This crate provides the building blocks shared by the ledger engine and
//! its front ends:
//! - Money and rate types with precise decimal arithmetic
//! - Strongly-typed identifiers
//! - Common error types

pub mod money;
pub mod identifiers;
pub mod error;

pub use money::{Money, Currency, MoneyError, Rate};
pub use identifiers::SaleId;
pub use error::CoreError;
