//! Aggregate totals and plan-vs-actual comparison

use core_kernel::{Currency, Money};
use serde::{Deserialize, Serialize};

use crate::category::Section;
use crate::config::PeriodFields;
use crate::document::FinancialDocument;
use crate::error::LedgerError;

/// Totals of the actual field across the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub fixed_revenue: Money,
    pub variable_revenue: Money,
    pub revenue: Money,
    pub taxes: Money,
    pub cogs: Money,
    /// revenue - COGS
    pub gross_result: Money,
    /// revenue - COGS - taxes
    pub net_profit: Money,
}

impl LedgerTotals {
    /// Sums the actual field of every category, per section
    pub fn compute(
        document: &FinancialDocument,
        field: &str,
        currency: Currency,
    ) -> Result<Self, LedgerError> {
        let sum = |section: Section| -> Result<Money, LedgerError> {
            Ok(Money::new(document.sum(section, field)?, currency))
        };

        let fixed_revenue = sum(Section::FixedRevenue)?;
        let variable_revenue = sum(Section::VariableRevenue)?;
        let taxes = sum(Section::Taxes)?;
        let cogs = sum(Section::VariableExpenses)?;

        let revenue = fixed_revenue.checked_add(&variable_revenue)?;
        let gross_result = revenue.checked_sub(&cogs)?;
        let net_profit = gross_result.checked_sub(&taxes)?;

        Ok(Self {
            fixed_revenue,
            variable_revenue,
            revenue,
            taxes,
            cogs,
            gross_result,
            net_profit,
        })
    }
}

/// Business plan against actuals for the current period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanComparison {
    pub planned_revenue: Money,
    pub planned_cogs: Money,
    pub planned_taxes: Money,
    pub planned_fixed_expenses: Money,
    /// planned revenue - COGS - taxes - fixed expenses
    pub planned_net_profit: Money,
    pub actual_net_profit: Money,
    /// planned - actual net profit
    pub gap: Money,
    pub delinquency: Money,
    /// Part of the gap not explained by delinquency
    pub other_variance: Money,
}

impl PlanComparison {
    /// Builds the comparison from the plan field of each category
    ///
    /// Categories without a plan figure count as zero. Actual fixed expenses
    /// are not tracked by the engine and do not enter the actual net profit.
    pub fn compute(
        document: &FinancialDocument,
        period: &PeriodFields,
        currency: Currency,
    ) -> Result<Self, LedgerError> {
        let planned = |section: Section| -> Result<Money, LedgerError> {
            Ok(Money::new(document.sum_or_zero(section, &period.plan)?, currency))
        };

        let planned_revenue = planned(Section::FixedRevenue)?.checked_add(&planned(Section::VariableRevenue)?)?;
        let planned_cogs = planned(Section::VariableExpenses)?;
        let planned_taxes = planned(Section::Taxes)?;
        let planned_fixed_expenses = Money::new(document.fixed_expenses_sum(&period.plan)?, currency);
        let planned_net_profit = planned_revenue
            .checked_sub(&planned_cogs)?
            .checked_sub(&planned_taxes)?
            .checked_sub(&planned_fixed_expenses)?;

        let actual_net_profit = LedgerTotals::compute(document, &period.actual, currency)?.net_profit;
        let gap = planned_net_profit.checked_sub(&actual_net_profit)?;
        let delinquency = Money::new(document.delinquency_total()?, currency);
        let other_variance = gap.checked_sub(&delinquency)?;

        Ok(Self {
            planned_revenue,
            planned_cogs,
            planned_taxes,
            planned_fixed_expenses,
            planned_net_profit,
            actual_net_profit,
            gap,
            delinquency,
            other_variance,
        })
    }
}
