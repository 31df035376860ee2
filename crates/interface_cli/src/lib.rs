//! Command-Line Layer
//!
//! This crate wires the sales ledger to a terminal: it loads configuration,
//! opens the engine over the configured files and runs the demo batch.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_cli::{config::AppConfig, demo};
//!
//! let app = AppConfig::from_env()?;
//! let mut engine = LedgerEngine::open_files(app.ledger, &app.storage)?;
//! demo::run(&mut engine, &demo::sample_customers(), &mut std::io::stdout())?;
//! ```

pub mod config;
pub mod demo;
pub mod error;

pub use crate::config::AppConfig;
pub use crate::demo::{run, sample_customers, Customer, DemoSummary};
pub use crate::error::CliError;
