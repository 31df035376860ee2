//! Payment status and delinquency
//!
//! A sale can be recorded as already paid or as pending with a due date.
//! Revenue, taxes and COGS are booked the same way in both cases; a pending
//! sale past its due date additionally moves its revenue into the
//! delinquency total and contributes no effective revenue.

use chrono::NaiveDate;
use core_kernel::{Money, MoneyError};
use serde::{Deserialize, Serialize};

use crate::sale::SaleOutcome;

/// Payment state of a sale at recording time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Pending { due_date: NaiveDate },
}

impl PaymentStatus {
    /// True when the sale is pending and `today` is past its due date
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self {
            PaymentStatus::Paid => false,
            PaymentStatus::Pending { due_date } => today > *due_date,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "PAGO",
            PaymentStatus::Pending { .. } => "PENDENTE",
        }
    }
}

/// Result of recording a sale with a payment status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub sale: SaleOutcome,
    pub status: PaymentStatus,
    pub overdue: bool,
    /// Revenue actually realized: total revenue, or zero when overdue
    pub effective_revenue: Money,
    /// Revenue moved to the delinquency total, zero unless overdue
    pub delinquency: Money,
    /// `effective_revenue - total_cogs - taxes`
    pub net_balance: Money,
}

impl PaymentOutcome {
    pub(crate) fn new(sale: SaleOutcome, status: PaymentStatus, today: NaiveDate) -> Result<Self, MoneyError> {
        let breakdown = &sale.breakdown;
        let currency = breakdown.total_revenue.currency();
        let overdue = status.is_overdue(today);

        let (effective_revenue, delinquency) = if overdue {
            (Money::zero(currency), breakdown.total_revenue)
        } else {
            (breakdown.total_revenue, Money::zero(currency))
        };
        let net_balance = effective_revenue
            .checked_sub(&breakdown.total_cogs)?
            .checked_sub(&breakdown.taxes)?;

        Ok(Self {
            sale,
            status,
            overdue,
            effective_revenue,
            delinquency,
            net_balance,
        })
    }
}
