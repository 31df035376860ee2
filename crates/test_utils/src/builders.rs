//! Test Data Builders
//!
//! Provides a builder for financial documents with sensible defaults, so
//! tests only spell out the categories they care about.

use domain_ledger::{Category, FinancialDocument, Section};
use rust_decimal::Decimal;

/// Actual-period field written by the builders
pub const ACTUAL: &str = "REAL_2026";

/// Builder for constructing test financial documents
pub struct DocumentBuilder {
    fixed_revenue: Vec<Category>,
    variable_revenue: Vec<Category>,
    taxes: Vec<Category>,
    variable_expenses: Vec<Category>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Creates a builder with four empty lists
    pub fn new() -> Self {
        Self {
            fixed_revenue: Vec::new(),
            variable_revenue: Vec::new(),
            taxes: Vec::new(),
            variable_expenses: Vec::new(),
        }
    }

    /// Creates a builder holding every category the default configuration
    /// targets, all at zero
    pub fn standard() -> Self {
        Self::new()
            .category(Section::FixedRevenue, "Receita Fixa - Mensalidade", Decimal::ZERO)
            .category(Section::VariableRevenue, "Receita Variável - Comissão", Decimal::ZERO)
            .category(Section::Taxes, "Impostos", Decimal::ZERO)
            .category(Section::VariableExpenses, "Servidor", Decimal::ZERO)
            .category(Section::VariableExpenses, "Tokens GPT", Decimal::ZERO)
            .category(Section::VariableExpenses, "Telefone", Decimal::ZERO)
            .category(Section::VariableExpenses, "API Oficial Whatsapp", Decimal::ZERO)
    }

    /// Adds a category with an actual value
    pub fn category(self, section: Section, label: &str, actual: Decimal) -> Self {
        let category = Category::new(label).with_amount(ACTUAL, actual).unwrap();
        self.push(section, category)
    }

    /// Adds a prepared category as is
    pub fn push(mut self, section: Section, category: Category) -> Self {
        match section {
            Section::FixedRevenue => self.fixed_revenue.push(category),
            Section::VariableRevenue => self.variable_revenue.push(category),
            Section::Taxes => self.taxes.push(category),
            Section::VariableExpenses => self.variable_expenses.push(category),
        }
        self
    }

    /// Removes every category of `section` whose label contains `fragment`
    pub fn without(mut self, section: Section, fragment: &str) -> Self {
        let list = match section {
            Section::FixedRevenue => &mut self.fixed_revenue,
            Section::VariableRevenue => &mut self.variable_revenue,
            Section::Taxes => &mut self.taxes,
            Section::VariableExpenses => &mut self.variable_expenses,
        };
        list.retain(|c| !c.matches_label(fragment));
        self
    }

    /// Builds the document
    pub fn build(self) -> FinancialDocument {
        FinancialDocument::new(
            self.fixed_revenue,
            self.variable_revenue,
            self.taxes,
            self.variable_expenses,
        )
    }

    /// Builds the document and renders it as pretty JSON
    pub fn build_json(self) -> String {
        self.build().to_json_pretty().unwrap()
    }
}
