//! Append-only audit trail
//!
//! One human-readable line per recorded sale. Lines are never rewritten;
//! the file is opened, appended to and closed for every record.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use core_kernel::Money;

use crate::error::LedgerError;
use crate::payment::PaymentOutcome;
use crate::sale::SaleOutcome;

/// Timestamp format of audit lines
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Figures written for one sale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEntry {
    Sale {
        total_revenue: Money,
        total_cogs: Money,
        taxes: Money,
        net_balance: Money,
    },
    /// A sale recorded with a payment status
    PaymentSale {
        effective_revenue: Money,
        total_cogs: Money,
        taxes: Money,
        delinquency: Money,
        net_balance: Money,
    },
}

/// A single audit line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditRecord {
    pub timestamp: NaiveDateTime,
    pub entry: AuditEntry,
}

impl AuditRecord {
    pub fn for_sale(timestamp: NaiveDateTime, outcome: &SaleOutcome) -> Self {
        Self {
            timestamp,
            entry: AuditEntry::Sale {
                total_revenue: outcome.total_revenue(),
                total_cogs: outcome.total_cogs(),
                taxes: outcome.taxes(),
                net_balance: outcome.net_balance(),
            },
        }
    }

    pub fn for_payment(timestamp: NaiveDateTime, outcome: &PaymentOutcome) -> Self {
        Self {
            timestamp,
            entry: AuditEntry::PaymentSale {
                effective_revenue: outcome.effective_revenue,
                total_cogs: outcome.sale.total_cogs(),
                taxes: outcome.sale.taxes(),
                delinquency: outcome.delinquency,
                net_balance: outcome.net_balance,
            },
        }
    }
}

impl fmt::Display for AuditRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | ", self.timestamp.format(TIMESTAMP_FORMAT))?;
        match &self.entry {
            AuditEntry::Sale {
                total_revenue,
                total_cogs,
                taxes,
                net_balance,
            } => write!(
                f,
                "Venda: R$ {:>8} | COGS: R$ {:>6} | Impostos: R$ {:>8} | Líquido: R$ {:>8}",
                total_revenue.fixed(),
                total_cogs.fixed(),
                taxes.fixed(),
                net_balance.fixed(),
            ),
            AuditEntry::PaymentSale {
                effective_revenue,
                total_cogs,
                taxes,
                delinquency,
                net_balance,
            } => write!(
                f,
                "Efetivo: R$ {:>8} | COGS: R$ {:>6} | Impostos: R$ {:>8} | Inad: R$ {:>6} | Líquido: R$ {:>8}",
                effective_revenue.fixed(),
                total_cogs.fixed(),
                taxes.fixed(),
                delinquency.fixed(),
                net_balance.fixed(),
            ),
        }
    }
}

/// Append-only UTF-8 log file
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one line, creating the file on first use
    pub fn append(&self, record: &AuditRecord) -> Result<(), LedgerError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", record)?;
        Ok(())
    }
}
