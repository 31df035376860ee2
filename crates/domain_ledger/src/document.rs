//! The persisted financial document
//!
//! The four category lists the engine works on are typed; everything else
//! in the document (fixed expenses, delinquency total, anything added by
//! other tools) is kept as raw JSON in its original key order.
//!
//! # Key order
//!
//! Values always round-trip unchanged, but the order of keys is only kept
//! among the untyped ones. On save the typed keys come first, in the order
//! `receitas`, `impostos`, `despesas_variaveis` (and `fixa`, `variavel`
//! inside `receitas`), followed by every other key in document order. Inside
//! a category `label` is written first. A document that already uses this
//! layout keeps its key order; any other layout is reordered on first save.

use core_kernel::MoneyError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::category::{decimal_from_value, decimal_to_value, Category, Section};
use crate::error::LedgerError;

/// Root-level field accumulating revenue of overdue sales
pub const DELINQUENCY_FIELD: &str = "inadimplencia_total";

/// Root-level object holding the fixed-expense lists
pub const FIXED_EXPENSES_FIELD: &str = "despesas_fixas";

/// Revenue lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revenues {
    #[serde(rename = "fixa")]
    pub fixed: Vec<Category>,
    #[serde(rename = "variavel")]
    pub variable: Vec<Category>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// The single financial document the ledger engine owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialDocument {
    #[serde(rename = "receitas")]
    pub revenues: Revenues,
    #[serde(rename = "impostos")]
    pub taxes: Vec<Category>,
    #[serde(rename = "despesas_variaveis")]
    pub variable_expenses: Vec<Category>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl FinancialDocument {
    /// Creates a document with the given lists and nothing else
    pub fn new(
        fixed_revenue: Vec<Category>,
        variable_revenue: Vec<Category>,
        taxes: Vec<Category>,
        variable_expenses: Vec<Category>,
    ) -> Self {
        Self {
            revenues: Revenues {
                fixed: fixed_revenue,
                variable: variable_revenue,
                extra: Map::new(),
            },
            taxes,
            variable_expenses,
            extra: Map::new(),
        }
    }

    /// Parses a document from JSON text
    ///
    /// # Errors
    ///
    /// Returns `MalformedDocument` if the text is not JSON or a required
    /// list is missing
    pub fn from_json(text: &str) -> Result<Self, LedgerError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Renders the document as 2-space indented JSON
    pub fn to_json_pretty(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn section(&self, section: Section) -> &[Category] {
        match section {
            Section::FixedRevenue => &self.revenues.fixed,
            Section::VariableRevenue => &self.revenues.variable,
            Section::Taxes => &self.taxes,
            Section::VariableExpenses => &self.variable_expenses,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut Vec<Category> {
        match section {
            Section::FixedRevenue => &mut self.revenues.fixed,
            Section::VariableRevenue => &mut self.revenues.variable,
            Section::Taxes => &mut self.taxes,
            Section::VariableExpenses => &mut self.variable_expenses,
        }
    }

    /// Sums a required numeric field over a section
    pub fn sum(&self, section: Section, field: &str) -> Result<Decimal, LedgerError> {
        self.section(section)
            .iter()
            .try_fold(Decimal::ZERO, |acc, c| checked_total(acc, c.amount(field)?))
    }

    /// Sums an optional numeric field over a section (absent counts as zero)
    pub fn sum_or_zero(&self, section: Section, field: &str) -> Result<Decimal, LedgerError> {
        self.section(section)
            .iter()
            .try_fold(Decimal::ZERO, |acc, c| checked_total(acc, c.amount_or_zero(field)?))
    }

    /// Accumulated delinquency, zero when the document has none yet
    pub fn delinquency_total(&self) -> Result<Decimal, LedgerError> {
        match self.extra.get(DELINQUENCY_FIELD) {
            None | Some(Value::Null) => Ok(Decimal::ZERO),
            Some(value) => decimal_from_value(DELINQUENCY_FIELD, DELINQUENCY_FIELD, value),
        }
    }

    /// Adds to the delinquency total, creating it if absent
    pub fn add_delinquency(&mut self, amount: Decimal) -> Result<Decimal, LedgerError> {
        let updated = checked_total(self.delinquency_total()?, amount)?;
        let value = decimal_to_value(DELINQUENCY_FIELD, updated)?;
        self.extra.insert(DELINQUENCY_FIELD.to_string(), value);
        Ok(updated)
    }

    /// Sums `field` over every category in the fixed-expense lists
    ///
    /// The fixed-expense object is optional; each of its members may be a
    /// list of category objects. Non-list members are ignored.
    pub fn fixed_expenses_sum(&self, field: &str) -> Result<Decimal, LedgerError> {
        let lists: Vec<&Vec<Value>> = match self.extra.get(FIXED_EXPENSES_FIELD) {
            Some(Value::Object(groups)) => groups.values().filter_map(Value::as_array).collect(),
            Some(Value::Array(list)) => vec![list],
            _ => return Ok(Decimal::ZERO),
        };

        let mut total = Decimal::ZERO;
        for item in lists.into_iter().flatten() {
            let label = item.get("label").and_then(Value::as_str).unwrap_or(FIXED_EXPENSES_FIELD);
            match item.get(field) {
                None | Some(Value::Null) => {}
                Some(value) => total = checked_total(total, decimal_from_value(label, field, value)?)?,
            }
        }
        Ok(total)
    }
}

fn checked_total(acc: Decimal, value: Decimal) -> Result<Decimal, LedgerError> {
    Ok(acc.checked_add(value).ok_or(MoneyError::Overflow)?)
}
