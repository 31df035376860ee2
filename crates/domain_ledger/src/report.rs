//! Operator-facing text reports
//!
//! Meant for a terminal, not for parsing. All amounts are fixed to two
//! decimals and right-aligned in a ten-character column.

use std::fmt;

use core_kernel::Money;

use crate::metrics::{LedgerTotals, PlanComparison};
use crate::payment::PaymentOutcome;
use crate::sale::SaleOutcome;

const WIDTH: usize = 70;
const LABEL_WIDTH: usize = 27;

fn rule(f: &mut fmt::Formatter<'_>, c: char) -> fmt::Result {
    writeln!(f, "{}", c.to_string().repeat(WIDTH))
}

fn subtotal_rule(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{:LABEL_WIDTH$}{}", "", "─".repeat(30))
}

fn line(f: &mut fmt::Formatter<'_>, label: &str, amount: &Money) -> fmt::Result {
    writeln!(
        f,
        "{:<LABEL_WIDTH$}{} {:>10}",
        label,
        amount.currency().symbol(),
        amount.fixed()
    )
}

/// Summary printed after each recorded sale
pub struct SaleReport<'a>(pub &'a SaleOutcome);

impl fmt::Display for SaleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.0;
        let b = &outcome.breakdown;

        rule(f, '=')?;
        writeln!(f, "VENDA REGISTRADA  {}", outcome.sale_id)?;
        rule(f, '=')?;
        line(f, "Receita Fixa:", &b.fixed_revenue)?;
        line(f, "Receita Variável (Comissão):", &b.commission)?;
        subtotal_rule(f)?;
        line(f, "Receita Total:", &b.total_revenue)?;
        writeln!(f)?;
        writeln!(f, "Custos Variáveis (COGS):")?;
        for cost in &b.cost_lines {
            writeln!(
                f,
                "  - {:<25} {} {:>10}",
                cost.name,
                cost.amount.currency().symbol(),
                cost.amount.fixed()
            )?;
        }
        subtotal_rule(f)?;
        line(f, "Total COGS:", &b.total_cogs)?;
        line(f, &format!("Impostos ({}):", b.tax_rate), &b.taxes)?;
        subtotal_rule(f)?;
        line(f, "Resultado Bruto:", &b.gross_result)?;
        line(f, "Saldo Líquido:", &b.net_balance)?;

        let skipped: Vec<_> = outcome.skipped().collect();
        if !skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Categorias não encontradas (valores não aplicados):")?;
            for update in skipped {
                writeln!(f, "  - {} / {}: {}", update.section, update.selector, update.amount)?;
            }
        }
        rule(f, '=')
    }
}

/// Summary printed after a sale recorded with a payment status
pub struct PaymentReport<'a>(pub &'a PaymentOutcome);

impl fmt::Display for PaymentReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = self.0;

        write!(f, "{}", SaleReport(&outcome.sale))?;
        writeln!(f, "Status: {}", outcome.status.label())?;
        if outcome.overdue {
            writeln!(f, "ALERTA DE INADIMPLÊNCIA: venda pendente e atrasada")?;
        }
        line(f, "Receita Efetiva:", &outcome.effective_revenue)?;
        line(f, "Inadimplência:", &outcome.delinquency)?;
        line(f, "Saldo Líquido da Operação:", &outcome.net_balance)?;
        rule(f, '=')
    }
}

/// Aggregate totals of the ledger
pub struct TotalsReport<'a>(pub &'a LedgerTotals);

impl fmt::Display for TotalsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.0;

        line(f, "Receita Fixa Total:", &t.fixed_revenue)?;
        line(f, "Receita Variável Total:", &t.variable_revenue)?;
        subtotal_rule(f)?;
        line(f, "Receita Total:", &t.revenue)?;
        writeln!(f)?;
        line(f, "COGS Total:", &t.cogs)?;
        line(f, "Impostos Total:", &t.taxes)?;
        subtotal_rule(f)?;
        line(f, "Resultado Bruto:", &t.gross_result)?;
        line(f, "Lucro Líquido:", &t.net_profit)
    }
}

/// Business plan against actuals
pub struct PlanReport<'a>(pub &'a PlanComparison);

impl fmt::Display for PlanReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.0;

        line(f, "Lucro Líquido BP:", &p.planned_net_profit)?;
        line(f, "Lucro Líquido Real:", &p.actual_net_profit)?;
        subtotal_rule(f)?;
        line(f, "GAP TOTAL:", &p.gap)?;
        writeln!(f)?;
        writeln!(f, "DETALHAMENTO DO GAP:")?;
        line(f, "- Impacto Inadimplência:", &p.delinquency)?;
        line(f, "- Outras Variações:", &p.other_variance)
    }
}
