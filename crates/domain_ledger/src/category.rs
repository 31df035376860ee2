//! Ledger categories and category lookup
//!
//! A category is a labelled bucket inside the financial document. Only the
//! `label`, an optional stable `key` and the numeric period fields are
//! interpreted here; every other field rides along untouched so the document
//! round-trips without loss.

use std::fmt;
use std::str::FromStr;

use core_kernel::MoneyError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::warn;

use crate::error::LedgerError;

/// Field holding a category's stable identifier
pub const KEY_FIELD: &str = "key";

/// The category lists of the financial document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    FixedRevenue,
    VariableRevenue,
    Taxes,
    VariableExpenses,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::FixedRevenue,
        Section::VariableRevenue,
        Section::Taxes,
        Section::VariableExpenses,
    ];

    /// Dotted path of the list inside the document
    pub fn path(&self) -> &'static str {
        match self {
            Section::FixedRevenue => "receitas.fixa",
            Section::VariableRevenue => "receitas.variavel",
            Section::Taxes => "impostos",
            Section::VariableExpenses => "despesas_variaveis",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A named bucket accumulating a running total per fiscal period
///
/// Serializes `label` first, then the other fields in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Human-readable label, matched case-insensitively by substring
    pub label: String,
    /// Every other field, in document order
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl Category {
    /// Creates a category with only a label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            fields: Map::new(),
        }
    }

    /// Sets a numeric field, e.g. `REAL_2026`
    ///
    /// # Errors
    ///
    /// Returns error if the amount cannot be represented as a JSON number
    pub fn with_amount(mut self, field: &str, amount: Decimal) -> Result<Self, LedgerError> {
        let value = decimal_to_value(&self.label, amount)?;
        self.fields.insert(field.to_string(), value);
        Ok(self)
    }

    /// Sets the stable key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.fields.insert(KEY_FIELD.to_string(), Value::String(key.into()));
        self
    }

    /// The stable key, if the document assigns one
    pub fn key(&self) -> Option<&str> {
        self.fields.get(KEY_FIELD).and_then(Value::as_str)
    }

    /// Case-insensitive substring match against the label
    pub fn matches_label(&self, fragment: &str) -> bool {
        self.label.to_lowercase().contains(&fragment.to_lowercase())
    }

    /// Reads a required numeric field
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` if the field is absent or not a number
    pub fn amount(&self, field: &str) -> Result<Decimal, LedgerError> {
        match self.fields.get(field) {
            Some(value) => decimal_from_value(&self.label, field, value),
            None => Err(LedgerError::invalid_amount(
                &self.label,
                format!("missing field {}", field),
            )),
        }
    }

    /// Reads an optional numeric field, treating absence (or null) as zero
    pub fn amount_or_zero(&self, field: &str) -> Result<Decimal, LedgerError> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(Decimal::ZERO),
            Some(value) => decimal_from_value(&self.label, field, value),
        }
    }

    /// Adds `delta` to a numeric field and returns the new value
    ///
    /// The field must already exist; a category without its period field is
    /// a structural problem in the document, not something to paper over.
    pub fn add(&mut self, field: &str, delta: Decimal) -> Result<Decimal, LedgerError> {
        let updated = self
            .amount(field)?
            .checked_add(delta)
            .ok_or(MoneyError::Overflow)?;
        let value = decimal_to_value(&self.label, updated)?;
        self.fields.insert(field.to_string(), value);
        Ok(updated)
    }
}

/// Returns the first category whose label contains `fragment`
/// (case-insensitive), or `None`.
///
/// Ties resolve to list order; no uniqueness check is made.
pub fn find_category<'a>(categories: &'a [Category], fragment: &str) -> Option<&'a Category> {
    find_category_index(categories, fragment).map(|index| &categories[index])
}

/// Index form of [`find_category`], for callers that need to mutate
pub fn find_category_index(categories: &[Category], fragment: &str) -> Option<usize> {
    let needle = fragment.to_lowercase();
    categories
        .iter()
        .position(|c| c.label.to_lowercase().contains(&needle))
}

/// Identifies the category a sale update targets
///
/// An exact `key` match wins; otherwise the label fragment is matched the
/// same way as [`find_category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySelector {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl CategorySelector {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: None,
        }
    }

    pub fn keyed(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: Some(key.into()),
        }
    }

    /// Resolves the selector to an index in `categories`
    pub fn resolve(&self, section: Section, categories: &[Category]) -> Option<usize> {
        if let Some(key) = &self.key {
            if let Some(index) = categories.iter().position(|c| c.key() == Some(key.as_str())) {
                return Some(index);
            }
        }

        let index = find_category_index(categories, &self.label)?;
        let matches = categories.iter().filter(|c| c.matches_label(&self.label)).count();
        if matches > 1 {
            warn!(
                section = %section,
                selector = %self,
                matches,
                chosen = %categories[index].label,
                "Ambiguous category selector, using first match"
            );
        }
        Some(index)
    }
}

impl fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{} ({})", key, self.label),
            None => f.write_str(&self.label),
        }
    }
}

pub(crate) fn decimal_from_value(label: &str, field: &str, value: &Value) -> Result<Decimal, LedgerError> {
    let number = match value {
        Value::Number(number) => number,
        other => {
            return Err(LedgerError::invalid_amount(
                label,
                format!("{} is not a number: {}", field, other),
            ))
        }
    };

    if let Some(i) = number.as_i64() {
        return Ok(Decimal::from(i));
    }
    if let Some(u) = number.as_u64() {
        return Ok(Decimal::from(u));
    }

    let text = number.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|e| LedgerError::invalid_amount(label, format!("{} = {}: {}", field, text, e)))
}

/// Writes every significant digit of `amount`, without trailing zeros
pub(crate) fn decimal_to_value(label: &str, amount: Decimal) -> Result<Value, LedgerError> {
    let text = amount.normalize().to_string();
    Number::from_str(&text)
        .map(Value::Number)
        .map_err(|e| LedgerError::invalid_amount(label, format!("{} is not representable: {}", text, e)))
}
