//! The demonstration batch
//!
//! Prints the ledger totals, records one sale per sample customer and prints
//! the totals again together with the plan comparison.

use std::io::Write;

use domain_ledger::{
    DocumentStore, LedgerEngine, LedgerTotals, PlanComparison, PlanReport, SaleOutcome,
    TotalsReport,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

use crate::error::CliError;

const WIDTH: usize = 70;

/// A sample customer and the commission recovered for them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub commission: Decimal,
}

impl Customer {
    pub fn new(name: impl Into<String>, commission: Decimal) -> Self {
        Self {
            name: name.into(),
            commission,
        }
    }
}

/// The five customers of the demo batch
pub fn sample_customers() -> Vec<Customer> {
    vec![
        Customer::new("Cliente 1", dec!(150.00)),
        Customer::new("Cliente 2", dec!(200.00)),
        Customer::new("Cliente 3", dec!(180.00)),
        Customer::new("Cliente 4", dec!(220.00)),
        Customer::new("Cliente 5", dec!(175.00)),
    ]
}

/// What a demo run produced
#[derive(Debug, Clone)]
pub struct DemoSummary {
    pub initial: LedgerTotals,
    pub outcomes: Vec<SaleOutcome>,
    pub totals: LedgerTotals,
    pub plan: PlanComparison,
}

fn banner(out: &mut impl Write, title: &str) -> std::io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(WIDTH))?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(WIDTH))
}

/// Runs the batch against `engine`, writing the narrative to `out`
///
/// Sale reports go to the engine's own operator output.
pub fn run<S: DocumentStore>(
    engine: &mut LedgerEngine<S>,
    customers: &[Customer],
    out: &mut impl Write,
) -> Result<DemoSummary, CliError> {
    banner(out, "SIMULAÇÃO DE VENDAS - LEDGER")?;

    let initial = engine.totals()?;
    writeln!(out, "\nESTADO INICIAL:")?;
    writeln!(out, "Receita Total Atual: {}", initial.revenue)?;
    writeln!(out, "COGS Total Atual: {}", initial.cogs)?;
    writeln!(out, "Lucro Líquido Atual: {}", initial.net_profit)?;

    banner(out, &format!("PROCESSANDO {} NOVOS CLIENTES", customers.len()))?;

    let mut outcomes = Vec::with_capacity(customers.len());
    for (idx, customer) in customers.iter().enumerate() {
        writeln!(out, "\n[{}/{}] Processando {}...", idx + 1, customers.len(), customer.name)?;
        out.flush()?;
        outcomes.push(engine.record_sale(customer.commission)?);
    }

    let totals = engine.totals()?;
    banner(out, "ESTADO FINAL:")?;
    writeln!(out)?;
    write!(out, "{}", TotalsReport(&totals))?;

    let plan = engine.plan_comparison()?;
    banner(out, "BUSINESS PLAN vs REAL:")?;
    writeln!(out)?;
    write!(out, "{}", PlanReport(&plan))?;

    banner(out, "Simulação concluída! Confira o log de transações para auditoria.")?;
    writeln!(out)?;

    info!(
        sales = outcomes.len(),
        revenue = %totals.revenue,
        net_profit = %totals.net_profit,
        gap = %plan.gap,
        "Demo batch finished"
    );

    Ok(DemoSummary {
        initial,
        outcomes,
        totals,
        plan,
    })
}
