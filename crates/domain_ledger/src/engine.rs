//! The ledger engine
//!
//! Owns the financial document for the lifetime of the process. Every
//! recorded sale is applied to a working copy, persisted in full, committed
//! in memory, appended to the audit log and reported to the operator.

use std::io::{self, Write};

use chrono::{Local, NaiveDate, NaiveDateTime};
use core_kernel::{Money, SaleId};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::audit::{AuditLog, AuditRecord};
use crate::category::{Category, CategorySelector, Section};
use crate::config::{LedgerConfig, StorageConfig};
use crate::document::FinancialDocument;
use crate::error::LedgerError;
use crate::metrics::{LedgerTotals, PlanComparison};
use crate::payment::{PaymentOutcome, PaymentStatus};
use crate::report::{PaymentReport, SaleReport};
use crate::sale::{CategoryUpdate, SaleBreakdown, SaleOutcome, UpdateStatus};
use crate::store::{DocumentStore, JsonFileStore};

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Records sales against the financial document
///
/// # Invariants
///
/// - The in-memory document always equals the last successfully saved one
/// - Exactly one audit line is appended per recorded sale
///
/// One engine per document: the engine is the single writer and nothing
/// coordinates two engines (or processes) pointed at the same storage.
pub struct LedgerEngine<S = JsonFileStore> {
    config: LedgerConfig,
    store: S,
    audit: AuditLog,
    document: FinancialDocument,
    operator: Box<dyn Write>,
    clock: fn() -> NaiveDateTime,
}

impl LedgerEngine<JsonFileStore> {
    /// Opens an engine over the configured JSON document and audit log
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the configuration does not validate
    /// - `DocumentNotFound` if the document file does not exist
    /// - `MalformedDocument` if it cannot be parsed
    pub fn open_files(config: LedgerConfig, storage: &StorageConfig) -> Result<Self, LedgerError> {
        Self::open(
            config,
            JsonFileStore::new(&storage.document_path),
            AuditLog::new(&storage.audit_log_path),
        )
    }
}

impl<S: DocumentStore> LedgerEngine<S> {
    /// Loads the document from `store` and builds the engine
    ///
    /// The operator report goes to stdout until replaced with
    /// [`with_operator_output`](Self::with_operator_output).
    pub fn open(config: LedgerConfig, store: S, audit: AuditLog) -> Result<Self, LedgerError> {
        config.validate()?;
        let document = store.load()?;

        info!(
            location = %store.location(),
            audit_log = %audit.path().display(),
            fixed_revenue = document.revenues.fixed.len(),
            variable_revenue = document.revenues.variable.len(),
            taxes = document.taxes.len(),
            variable_expenses = document.variable_expenses.len(),
            "Ledger engine opened"
        );

        Ok(Self {
            config,
            store,
            audit,
            document,
            operator: Box::new(io::stdout()),
            clock: local_now,
        })
    }

    /// Redirects the operator report (e.g. to `io::sink()` in tests)
    pub fn with_operator_output(mut self, output: impl Write + 'static) -> Self {
        self.operator = Box::new(output);
        self
    }

    /// Replaces the clock used for audit timestamps
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn document(&self) -> &FinancialDocument {
        &self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    /// First category in `section` whose label contains `fragment`
    pub fn find_category(&self, section: Section, fragment: &str) -> Option<&Category> {
        crate::category::find_category(self.document.section(section), fragment)
    }

    /// Records one sale
    ///
    /// Computes the breakdown, increments the fixed-revenue, variable-revenue,
    /// tax and COGS categories, saves the document, appends an audit line
    /// and writes the operator report.
    ///
    /// A target category that cannot be found is skipped and reported in the
    /// outcome, unless `strict_categories` is set.
    ///
    /// # Errors
    ///
    /// - `CategoryNotFound` in strict mode; nothing is changed
    /// - `InvalidAmount` if a matched category lacks a numeric period field;
    ///   nothing is changed
    /// - `Money` if the sale or an updated total leaves the decimal range;
    ///   nothing is changed
    /// - `Persist` if saving fails; the in-memory document is unchanged
    /// - `Io` if the audit log or operator report cannot be written; the
    ///   document has already been saved at that point
    #[instrument(skip(self))]
    pub fn record_sale(&mut self, commission: Decimal) -> Result<SaleOutcome, LedgerError> {
        let outcome = self.commit_sale(commission, false)?;

        let record = AuditRecord::for_sale((self.clock)(), &outcome);
        self.audit.append(&record)?;
        write!(self.operator, "{}", SaleReport(&outcome))?;

        Ok(outcome)
    }

    /// Records one sale together with its payment state
    ///
    /// Categories are updated exactly as in [`record_sale`](Self::record_sale).
    /// If the sale is pending and `today` is past its due date, its total
    /// revenue is also added to the document's delinquency total.
    #[instrument(skip(self, status), fields(status = status.label()))]
    pub fn record_sale_with_payment(
        &mut self,
        commission: Decimal,
        status: PaymentStatus,
        today: NaiveDate,
    ) -> Result<PaymentOutcome, LedgerError> {
        let sale = self.commit_sale(commission, status.is_overdue(today))?;
        let outcome = PaymentOutcome::new(sale, status, today)?;
        if outcome.overdue {
            warn!(
                sale_id = %outcome.sale.sale_id,
                delinquency = %outcome.delinquency,
                "Pending sale is past due, revenue booked as delinquency"
            );
        }

        let record = AuditRecord::for_payment((self.clock)(), &outcome);
        self.audit.append(&record)?;
        write!(self.operator, "{}", PaymentReport(&outcome))?;

        Ok(outcome)
    }

    /// Sums the actual field of every category
    pub fn totals(&self) -> Result<LedgerTotals, LedgerError> {
        LedgerTotals::compute(&self.document, &self.config.period.actual, self.config.currency)
    }

    /// Business plan against actuals for the configured period
    pub fn plan_comparison(&self) -> Result<PlanComparison, LedgerError> {
        PlanComparison::compute(&self.document, &self.config.period, self.config.currency)
    }

    /// Revenue of overdue sales accumulated in the document
    pub fn delinquency_total(&self) -> Result<Money, LedgerError> {
        Ok(Money::new(self.document.delinquency_total()?, self.config.currency))
    }

    /// Applies a sale to a working copy, saves it, then commits it in memory
    ///
    /// An overdue sale also adds its total revenue to the delinquency total.
    fn commit_sale(&mut self, commission: Decimal, overdue: bool) -> Result<SaleOutcome, LedgerError> {
        let breakdown = SaleBreakdown::compute(&self.config, commission)?;
        let requested = self.requested_updates(&breakdown);

        let mut working = self.document.clone();
        let mut updates = Vec::with_capacity(requested.len());
        for (section, selector, amount) in requested {
            updates.push(self.apply_update(&mut working, section, selector, amount)?);
        }
        if overdue {
            working.add_delinquency(breakdown.total_revenue.amount())?;
        }

        self.store.save(&working)?;
        self.document = working;

        let outcome = SaleOutcome {
            sale_id: SaleId::new(),
            breakdown,
            updates,
        };

        let skipped = outcome.skipped().count();
        for update in outcome.skipped() {
            warn!(
                sale_id = %outcome.sale_id,
                section = %update.section,
                selector = %update.selector,
                amount = %update.amount,
                "Category not found, update skipped"
            );
        }
        info!(
            sale_id = %outcome.sale_id,
            total_revenue = %outcome.total_revenue(),
            total_cogs = %outcome.total_cogs(),
            taxes = %outcome.taxes(),
            net_balance = %outcome.net_balance(),
            skipped,
            "Sale recorded"
        );

        Ok(outcome)
    }

    fn requested_updates(&self, breakdown: &SaleBreakdown) -> Vec<(Section, CategorySelector, Money)> {
        let targets = &self.config.targets;
        let mut requested = vec![
            (Section::FixedRevenue, targets.fixed_revenue.clone(), breakdown.fixed_revenue),
            (Section::VariableRevenue, targets.variable_revenue.clone(), breakdown.commission),
            (Section::Taxes, targets.taxes.clone(), breakdown.taxes),
        ];
        for (cost, line) in self.config.unit_costs.iter().zip(&breakdown.cost_lines) {
            requested.push((Section::VariableExpenses, cost.selector(), line.amount));
        }
        requested
    }

    fn apply_update(
        &self,
        working: &mut FinancialDocument,
        section: Section,
        selector: CategorySelector,
        amount: Money,
    ) -> Result<CategoryUpdate, LedgerError> {
        let categories = working.section_mut(section);

        let Some(index) = selector.resolve(section, categories) else {
            if self.config.strict_categories {
                return Err(LedgerError::CategoryNotFound {
                    section,
                    selector: selector.to_string(),
                });
            }
            return Ok(CategoryUpdate {
                section,
                selector: selector.to_string(),
                matched_label: None,
                amount,
                status: UpdateStatus::Skipped,
            });
        };

        let category = &mut categories[index];
        category.add(&self.config.period.actual, amount.amount())?;

        Ok(CategoryUpdate {
            section,
            selector: selector.to_string(),
            matched_label: Some(category.label.clone()),
            amount,
            status: UpdateStatus::Applied,
        })
    }
}
