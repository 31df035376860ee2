//! Sales Ledger - Demo Binary
//!
//! Records a fixed batch of five sample sales against the configured
//! financial document and prints the totals before and after.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin ledger-demo
//!
//! # Point at another document
//! LEDGER__STORAGE__DOCUMENT_PATH=/tmp/schema.json cargo run --bin ledger-demo
//! ```
//!
//! # Environment Variables
//!
//! * `LEDGER__STORAGE__DOCUMENT_PATH` - Financial document (default: data/schema_financeiro.json)
//! * `LEDGER__STORAGE__AUDIT_LOG_PATH` - Audit log (default: data/transacoes.log)
//! * `LEDGER__LEDGER__STRICT_CATEGORIES` - Fail on missing categories (default: false)
//! * `LEDGER__LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use anyhow::Context;
use domain_ledger::LedgerEngine;
use interface_cli::{config::AppConfig, demo};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the demo.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded or does not validate
/// - The financial document is missing or malformed
/// - A sale cannot be persisted or audited
fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("loading configuration")?;

    init_tracing(&config.log_level);

    tracing::info!(
        document = %config.storage.document_path.display(),
        audit_log = %config.storage.audit_log_path.display(),
        "Starting sales ledger demo"
    );

    let mut engine = LedgerEngine::open_files(config.ledger, &config.storage)
        .with_context(|| format!("opening {}", config.storage.document_path.display()))?;

    let stdout = std::io::stdout();
    demo::run(&mut engine, &demo::sample_customers(), &mut stdout.lock())?;

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so they do not interleave with the report on stdout.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
