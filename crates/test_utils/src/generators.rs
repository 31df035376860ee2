//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating commissions, configurations
//! and documents that keep the ledger's invariants.

use core_kernel::Rate;
use domain_ledger::{LedgerConfig, Section, UnitCost};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::builders::DocumentBuilder;

/// Strategy for commissions with two decimal places (0.00 to 10,000.00)
pub fn commission_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for commissions with 3 to 6 decimal places, possibly negative
/// (refund-like inputs)
pub fn precise_commission_strategy() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..1_000_000_000i64, 3u32..=6u32).prop_map(|(units, scale)| Decimal::new(units, scale))
}

/// Strategy for batches of commissions
pub fn commission_batch_strategy(max_len: usize) -> impl Strategy<Value = Vec<Decimal>> {
    proptest::collection::vec(commission_strategy(), 1..=max_len)
}

/// Strategy for valid tax rates (0.0000 to 1.0000)
pub fn tax_rate_strategy() -> impl Strategy<Value = Rate> {
    (0u32..=10000u32).prop_map(|n| Rate::new(Decimal::new(n as i64, 4)))
}

/// Strategy for unit cost amounts (0.00 to 1,000.00)
pub fn unit_cost_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for valid ledger configurations keeping the default cost names
pub fn ledger_config_strategy() -> impl Strategy<Value = LedgerConfig> {
    (
        (0i64..200_000i64).prop_map(|cents| Decimal::new(cents, 2)),
        tax_rate_strategy(),
        proptest::collection::vec(unit_cost_amount_strategy(), 4..=4),
    )
        .prop_map(|(fixed_revenue, tax_rate, amounts)| {
            let names = ["Servidor", "Tokens GPT", "Telefone", "API Oficial Whatsapp"];
            LedgerConfig {
                fixed_revenue_per_sale: fixed_revenue,
                tax_rate,
                unit_costs: names
                    .iter()
                    .zip(amounts)
                    .map(|(name, amount)| UnitCost::new(*name, amount))
                    .collect(),
                ..LedgerConfig::default()
            }
        })
}

/// Strategy for standard documents with arbitrary starting actuals
pub fn starting_actuals_strategy() -> impl Strategy<Value = Vec<Decimal>> {
    proptest::collection::vec((0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2)), 7..=7)
}

/// Builds a standard document from seven starting actuals
///
/// Order: fixed revenue, variable revenue, taxes, then the four COGS
/// categories of the default configuration.
pub fn document_with_actuals(actuals: &[Decimal]) -> DocumentBuilder {
    let labels = [
        (Section::FixedRevenue, "Receita Fixa - Mensalidade"),
        (Section::VariableRevenue, "Receita Variável - Comissão"),
        (Section::Taxes, "Impostos"),
        (Section::VariableExpenses, "Servidor"),
        (Section::VariableExpenses, "Tokens GPT"),
        (Section::VariableExpenses, "Telefone"),
        (Section::VariableExpenses, "API Oficial Whatsapp"),
    ];
    labels
        .iter()
        .zip(actuals)
        .fold(DocumentBuilder::new(), |builder, ((section, label), actual)| {
            builder.category(*section, label, *actual)
        })
}
