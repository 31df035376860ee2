//! Ledger configuration
//!
//! Business constants are explicit configuration passed to the engine at
//! construction. Defaults reproduce the current price list.

use std::path::PathBuf;

use core_kernel::{Currency, Rate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::category::CategorySelector;
use crate::error::LedgerError;

/// A per-sale unit cost charged to the COGS category of the same name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitCost {
    /// Cost item name, also used as the COGS category label fragment
    pub name: String,
    pub amount: Decimal,
    /// Optional stable key of the COGS category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl UnitCost {
    pub fn new(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            amount,
            key: None,
        }
    }

    pub fn selector(&self) -> CategorySelector {
        CategorySelector {
            label: self.name.clone(),
            key: self.key.clone(),
        }
    }
}

/// Categories updated on every sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryTargets {
    pub fixed_revenue: CategorySelector,
    pub variable_revenue: CategorySelector,
    pub taxes: CategorySelector,
}

impl Default for CategoryTargets {
    fn default() -> Self {
        Self {
            fixed_revenue: CategorySelector::label("Receita Fixa - Mensalidade"),
            variable_revenue: CategorySelector::label("Receita Variável - Comissão"),
            taxes: CategorySelector::label("Impostos"),
        }
    }
}

/// Names of the per-period numeric fields inside each category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodFields {
    /// Accumulated actual value for the current fiscal bucket
    pub actual: String,
    /// Business-plan value for the same bucket
    pub plan: String,
}

impl Default for PeriodFields {
    fn default() -> Self {
        Self {
            actual: "REAL_2026".to_string(),
            plan: "BP_2026".to_string(),
        }
    }
}

/// Business constants and lookup rules for the ledger engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub currency: Currency,
    /// Amount added to fixed revenue on every sale
    pub fixed_revenue_per_sale: Decimal,
    /// Fraction of total revenue booked as taxes
    pub tax_rate: Rate,
    /// Charged in full on every sale, in this order
    pub unit_costs: Vec<UnitCost>,
    pub targets: CategoryTargets,
    pub period: PeriodFields,
    /// Fail a sale when a target category is missing instead of skipping it
    pub strict_categories: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            currency: Currency::BRL,
            fixed_revenue_per_sale: dec!(597.00),
            tax_rate: Rate::new(dec!(0.16)),
            unit_costs: vec![
                UnitCost::new("Servidor", dec!(10.00)),
                UnitCost::new("Tokens GPT", dec!(10.00)),
                UnitCost::new("Telefone", dec!(30.00)),
                UnitCost::new("API Oficial Whatsapp", dec!(200.00)),
            ],
            targets: CategoryTargets::default(),
            period: PeriodFields::default(),
            strict_categories: false,
        }
    }
}

impl LedgerConfig {
    /// Sum of all unit costs
    pub fn total_unit_cost(&self) -> Decimal {
        self.unit_costs.iter().map(|c| c.amount).sum()
    }

    /// Checks the configuration before an engine is built from it
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a tax rate outside `0..=1`, a blank
    /// cost name or label, or blank period field names
    pub fn validate(&self) -> Result<(), LedgerError> {
        self.tax_rate
            .validate()
            .map_err(|e| LedgerError::InvalidConfig(e.to_string()))?;

        if let Some(cost) = self.unit_costs.iter().find(|c| c.name.trim().is_empty()) {
            return Err(LedgerError::InvalidConfig(format!(
                "unit cost of {} has an empty name",
                cost.amount
            )));
        }

        let labels = [
            &self.targets.fixed_revenue,
            &self.targets.variable_revenue,
            &self.targets.taxes,
        ];
        if labels.iter().any(|s| s.label.trim().is_empty()) {
            return Err(LedgerError::InvalidConfig(
                "category target labels must not be empty".to_string(),
            ));
        }

        if self.period.actual.trim().is_empty() || self.period.plan.trim().is_empty() {
            return Err(LedgerError::InvalidConfig(
                "period field names must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Where the document and the audit log live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub document_path: PathBuf,
    pub audit_log_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            document_path: PathBuf::from("data/schema_financeiro.json"),
            audit_log_path: PathBuf::from("data/transacoes.log"),
        }
    }
}
