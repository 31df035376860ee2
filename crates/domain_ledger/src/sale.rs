//! Sale computation and outcomes
//!
//! A sale is never stored as an entity. Its breakdown is computed from the
//! configuration, applied to the document as category increments and then
//! reported back together with what was actually applied.

use core_kernel::{Money, MoneyError, Rate, SaleId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::Section;
use crate::config::LedgerConfig;

/// One COGS line of a sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLine {
    pub name: String,
    pub amount: Money,
}

/// The derived figures of a single sale
///
/// - `total_revenue = fixed_revenue + commission`
/// - `gross_result = total_revenue - total_cogs`
/// - `taxes = total_revenue * tax_rate`
/// - `net_balance = gross_result - taxes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleBreakdown {
    pub fixed_revenue: Money,
    pub commission: Money,
    pub total_revenue: Money,
    pub cost_lines: Vec<CostLine>,
    pub total_cogs: Money,
    pub gross_result: Money,
    pub tax_rate: Rate,
    pub taxes: Money,
    pub net_balance: Money,
}

impl SaleBreakdown {
    /// Computes the breakdown for one sale
    ///
    /// The commission is taken as given, at full precision; negative or
    /// unusually large values are processed like any other.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if a figure leaves the decimal range
    pub fn compute(config: &LedgerConfig, commission: Decimal) -> Result<Self, MoneyError> {
        let currency = config.currency;
        let fixed_revenue = Money::new(config.fixed_revenue_per_sale, currency);
        let commission = Money::new(commission, currency);
        let total_revenue = fixed_revenue.checked_add(&commission)?;

        let cost_lines: Vec<CostLine> = config
            .unit_costs
            .iter()
            .map(|cost| CostLine {
                name: cost.name.clone(),
                amount: Money::new(cost.amount, currency),
            })
            .collect();
        let total_cogs = Money::try_sum(cost_lines.iter().map(|line| &line.amount), currency)?;

        let gross_result = total_revenue.checked_sub(&total_cogs)?;
        let taxes = config.tax_rate.apply(&total_revenue)?;
        let net_balance = gross_result.checked_sub(&taxes)?;

        Ok(Self {
            fixed_revenue,
            commission,
            total_revenue,
            cost_lines,
            total_cogs,
            gross_result,
            tax_rate: config.tax_rate,
            taxes,
            net_balance,
        })
    }
}

/// Whether a category increment reached the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStatus {
    Applied,
    /// No category matched the selector; the document was not touched
    Skipped,
}

/// A single category increment requested by a sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub section: Section,
    /// Selector as configured
    pub selector: String,
    /// Label of the category that matched, if any
    pub matched_label: Option<String>,
    pub amount: Money,
    pub status: UpdateStatus,
}

impl CategoryUpdate {
    pub fn is_applied(&self) -> bool {
        self.status == UpdateStatus::Applied
    }
}

/// Result of recording a sale
///
/// The breakdown reflects the computed transaction. Check `skipped()` to see
/// which increments did not reach the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleOutcome {
    pub sale_id: SaleId,
    pub breakdown: SaleBreakdown,
    pub updates: Vec<CategoryUpdate>,
}

impl SaleOutcome {
    pub fn total_revenue(&self) -> Money {
        self.breakdown.total_revenue
    }

    pub fn total_cogs(&self) -> Money {
        self.breakdown.total_cogs
    }

    pub fn taxes(&self) -> Money {
        self.breakdown.taxes
    }

    pub fn net_balance(&self) -> Money {
        self.breakdown.net_balance
    }

    /// Updates whose target category was not found
    pub fn skipped(&self) -> impl Iterator<Item = &CategoryUpdate> {
        self.updates.iter().filter(|u| !u.is_applied())
    }

    pub fn fully_applied(&self) -> bool {
        self.updates.iter().all(CategoryUpdate::is_applied)
    }
}
