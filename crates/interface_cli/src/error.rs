//! CLI error handling

use domain_ledger::LedgerError;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}
