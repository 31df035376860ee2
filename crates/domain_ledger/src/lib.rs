//! Sales Ledger Domain
//!
//! This crate records subscription sales against a single JSON financial
//! document and derives the figures management looks at: revenue, COGS,
//! taxes, net balance and the gap to the business plan.
//!
//! # Architecture
//!
//! - **Document**: typed category lists with every unknown field preserved
//! - **Engine**: owns the document, applies sales and persists them
//! - **Store**: the persistence seam (JSON file with atomic replace, or memory)
//! - **Audit**: one append-only text line per sale
//!
//! # Sale Flow
//!
//! ```text
//! commission -> SaleBreakdown -> category increments -> save -> audit line -> report
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_ledger::{LedgerConfig, LedgerEngine, StorageConfig};
//! use rust_decimal_macros::dec;
//!
//! let mut engine = LedgerEngine::open_files(LedgerConfig::default(), &StorageConfig::default())?;
//! let outcome = engine.record_sale(dec!(150))?;
//! assert_eq!(outcome.net_balance().amount(), dec!(377.48));
//! ```

pub mod audit;
pub mod category;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod payment;
pub mod report;
pub mod sale;
pub mod store;

pub use audit::{AuditEntry, AuditLog, AuditRecord};
pub use category::{find_category, Category, CategorySelector, Section};
pub use config::{CategoryTargets, LedgerConfig, PeriodFields, StorageConfig, UnitCost};
pub use document::{FinancialDocument, Revenues};
pub use engine::LedgerEngine;
pub use error::LedgerError;
pub use metrics::{LedgerTotals, PlanComparison};
pub use payment::{PaymentOutcome, PaymentStatus};
pub use report::{PaymentReport, PlanReport, SaleReport, TotalsReport};
pub use sale::{CategoryUpdate, CostLine, SaleBreakdown, SaleOutcome, UpdateStatus};
pub use store::{DocumentStore, JsonFileStore, MemoryStore};
