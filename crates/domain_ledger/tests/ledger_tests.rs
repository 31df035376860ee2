//! Integration tests for domain_ledger
//!
//! Exercises the engine end to end: file and memory stores, audit trail,
//! payment states, totals and the plan comparison.

use std::fs;
use std::io;

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use core_kernel::{Money, MoneyError, Rate};
use domain_ledger::{
    AuditLog, Category, CategorySelector, DocumentStore, JsonFileStore, LedgerConfig,
    LedgerEngine, LedgerError, MemoryStore, PaymentStatus, SaleBreakdown, Section, UnitCost,
};
use test_utils::{
    assert_audit_lines, assert_category_amount, assert_money_eq, assert_money_zero,
    commission_batch_strategy, commission_strategy, document_with_actuals, ledger_config_strategy,
    precise_commission_strategy, starting_actuals_strategy, DocumentBuilder, LedgerFixtures,
    SaleFixtures, ScratchDir, TemporalFixtures, ACTUAL, DEMO_COMMISSIONS, SAMPLE_DOCUMENT_JSON,
};

const DOCUMENT_FILE: &str = "schema_financeiro.json";
const AUDIT_FILE: &str = "transacoes.log";

/// Engine over the sample document written into `dir`
fn file_engine(dir: &ScratchDir, config: LedgerConfig) -> LedgerEngine {
    dir.write(DOCUMENT_FILE, SAMPLE_DOCUMENT_JSON);
    LedgerEngine::open_files(config, &dir.storage())
        .unwrap()
        .with_operator_output(io::sink())
        .with_clock(TemporalFixtures::timestamp)
}

/// Engine over an in-memory document, auditing into `dir`
fn memory_engine(dir: &ScratchDir, json: String, config: LedgerConfig) -> LedgerEngine<MemoryStore> {
    LedgerEngine::open(config, MemoryStore::with_json(json), AuditLog::new(dir.join(AUDIT_FILE)))
        .unwrap()
        .with_operator_output(io::sink())
        .with_clock(TemporalFixtures::timestamp)
}

// ============================================================================
// Sale Recording Tests
// ============================================================================

mod sale_recording_tests {
    use super::*;

    #[test]
    fn test_reference_sale_updates_every_target() {
        let dir = ScratchDir::new();
        let mut engine = file_engine(&dir, LedgerFixtures::config());

        let outcome = engine.record_sale(dec!(150.00)).unwrap();

        assert_eq!(outcome.total_revenue(), SaleFixtures::total_revenue());
        assert_eq!(outcome.total_cogs(), SaleFixtures::total_cogs());
        assert_eq!(outcome.taxes(), SaleFixtures::taxes());
        assert_eq!(outcome.net_balance(), SaleFixtures::net_balance());
        assert!(outcome.fully_applied());
        assert_eq!(outcome.updates.len(), 7);

        let doc = engine.document();
        assert_category_amount(doc, Section::FixedRevenue, "Receita Fixa", ACTUAL, dec!(597));
        assert_category_amount(doc, Section::VariableRevenue, "Comissão", ACTUAL, dec!(150));
        assert_category_amount(doc, Section::Taxes, "Impostos", ACTUAL, dec!(119.52));
        assert_category_amount(doc, Section::VariableExpenses, "Servidor", ACTUAL, dec!(10));
        assert_category_amount(doc, Section::VariableExpenses, "Tokens GPT", ACTUAL, dec!(10));
        assert_category_amount(doc, Section::VariableExpenses, "Telefone", ACTUAL, dec!(30));
        assert_category_amount(doc, Section::VariableExpenses, "Whatsapp", ACTUAL, dec!(200));
    }

    #[test]
    fn test_update_records_matched_label() {
        let dir = ScratchDir::new();
        let mut engine = file_engine(&dir, LedgerFixtures::config());

        let outcome = engine.record_sale(dec!(150)).unwrap();
        let tax = outcome
            .updates
            .iter()
            .find(|u| u.section == Section::Taxes)
            .unwrap();

        assert_eq!(tax.matched_label.as_deref(), Some("Impostos"));
        assert_money_eq(&tax.amount, dec!(119.52));
    }

    #[test]
    fn test_other_categories_are_not_touched() {
        let dir = ScratchDir::new();
        let json = DocumentBuilder::standard()
            .category(Section::FixedRevenue, "Receita Fixa - Setup", dec!(100))
            .category(Section::VariableExpenses, "Marketing", dec!(50))
            .build_json();
        let mut engine = memory_engine(&dir, json, LedgerFixtures::config());

        engine.record_sale(dec!(150)).unwrap();

        let doc = engine.document();
        assert_category_amount(doc, Section::FixedRevenue, "Mensalidade", ACTUAL, dec!(597));
        assert_category_amount(doc, Section::FixedRevenue, "Setup", ACTUAL, dec!(100));
        assert_category_amount(doc, Section::VariableExpenses, "Marketing", ACTUAL, dec!(50));
        assert_category_amount(doc, Section::VariableRevenue, "Comissão", ACTUAL, dec!(150));
    }

    #[test]
    fn test_first_matching_category_receives_the_increment() {
        let dir = ScratchDir::new();
        let json = DocumentBuilder::standard()
            .category(Section::Taxes, "Impostos Municipais", dec!(0))
            .build_json();
        let mut engine = memory_engine(&dir, json, LedgerFixtures::config());

        engine.record_sale(dec!(150)).unwrap();

        let taxes = engine.document().section(Section::Taxes);
        assert_eq!(taxes[0].amount(ACTUAL).unwrap(), dec!(119.52));
        assert_eq!(taxes[1].amount(ACTUAL).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_missing_category_is_skipped_and_reported() {
        let dir = ScratchDir::new();
        let json = DocumentBuilder::standard().without(Section::Taxes, "Impostos").build_json();
        let mut engine = memory_engine(&dir, json, LedgerFixtures::config());

        let outcome = engine.record_sale(dec!(150)).unwrap();

        let skipped: Vec<_> = outcome.skipped().collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].section, Section::Taxes);
        assert_eq!(skipped[0].selector, "Impostos");
        assert!(skipped[0].matched_label.is_none());
        assert!(!outcome.fully_applied());

        // Taxes are still computed even though they were not booked
        assert_eq!(outcome.taxes(), SaleFixtures::taxes());
        assert!(engine.document().section(Section::Taxes).is_empty());
        assert_category_amount(engine.document(), Section::FixedRevenue, "Mensalidade", ACTUAL, dec!(597));
    }

    #[test]
    fn test_no_matching_categories_leaves_document_unchanged() {
        let dir = ScratchDir::new();
        let json = DocumentBuilder::new()
            .category(Section::FixedRevenue, "Outra Receita", dec!(42))
            .category(Section::VariableExpenses, "Aluguel", dec!(7))
            .build_json();
        let mut engine = memory_engine(&dir, json, LedgerFixtures::config());
        let before = engine.document().clone();

        let outcome = engine.record_sale(dec!(150)).unwrap();

        assert_eq!(outcome.skipped().count(), 7);
        assert_eq!(engine.document(), &before);
        assert_eq!(engine.store().save_count(), 1);
    }

    #[test]
    fn test_strict_mode_fails_before_any_change() {
        let dir = ScratchDir::new();
        let json = DocumentBuilder::standard()
            .without(Section::VariableExpenses, "Telefone")
            .build_json();
        let mut engine = memory_engine(&dir, json, LedgerFixtures::strict_config());
        let before = engine.document().clone();

        let result = engine.record_sale(dec!(150));

        match result {
            Err(LedgerError::CategoryNotFound { section, selector }) => {
                assert_eq!(section, Section::VariableExpenses);
                assert_eq!(selector, "Telefone");
            }
            other => panic!("Expected CategoryNotFound, got {:?}", other),
        }
        assert_eq!(engine.document(), &before);
        assert_eq!(engine.store().save_count(), 0);
        assert!(!dir.join(AUDIT_FILE).exists());
    }

    #[test]
    fn test_category_without_period_field_fails_without_change() {
        let dir = ScratchDir::new();
        let json = DocumentBuilder::standard()
            .without(Section::Taxes, "Impostos")
            .push(Section::Taxes, Category::new("Impostos"))
            .build_json();
        let mut engine = memory_engine(&dir, json, LedgerFixtures::config());
        let before = engine.document().clone();

        test_utils::assert_err_variant!(engine.record_sale(dec!(150)), LedgerError::InvalidAmount { .. });
        assert_eq!(engine.document(), &before);
        assert_eq!(engine.store().save_count(), 0);
    }

    #[test]
    fn test_keyed_selector_targets_exact_category() {
        let dir = ScratchDir::new();
        let json = DocumentBuilder::standard()
            .without(Section::VariableExpenses, "Servidor")
            .category(Section::VariableExpenses, "Servidor (legado)", dec!(0))
            .push(
                Section::VariableExpenses,
                Category::new("Servidor")
                    .with_amount(ACTUAL, dec!(0))
                    .unwrap()
                    .with_key("cogs.server"),
            )
            .build_json();
        let mut config = LedgerFixtures::config();
        config.unit_costs[0] = UnitCost {
            key: Some("cogs.server".to_string()),
            ..UnitCost::new("Servidor", dec!(10))
        };
        config.targets.taxes = CategorySelector::keyed("tax.main", "Impostos");
        let mut engine = memory_engine(&dir, json, config);

        let outcome = engine.record_sale(dec!(150)).unwrap();

        assert!(outcome.fully_applied());
        let servers = engine.document().section(Section::VariableExpenses);
        let legacy = servers.iter().find(|c| c.label == "Servidor (legado)").unwrap();
        let keyed = servers.iter().find(|c| c.key() == Some("cogs.server")).unwrap();
        assert_eq!(legacy.amount(ACTUAL).unwrap(), Decimal::ZERO);
        assert_eq!(keyed.amount(ACTUAL).unwrap(), dec!(10));
        // Unknown key falls back to the label
        assert_category_amount(engine.document(), Section::Taxes, "Impostos", ACTUAL, dec!(119.52));
    }

    #[test]
    fn test_negative_commission_is_recorded() {
        let dir = ScratchDir::new();
        let mut engine = file_engine(&dir, LedgerFixtures::config());

        let outcome = engine.record_sale(dec!(-97)).unwrap();

        assert_money_eq(&outcome.total_revenue(), dec!(500));
        assert_category_amount(engine.document(), Section::VariableRevenue, "Comissão", ACTUAL, dec!(-97));
    }

    #[test]
    fn test_invalid_config_is_rejected_at_open() {
        let dir = ScratchDir::new();
        dir.write(DOCUMENT_FILE, SAMPLE_DOCUMENT_JSON);
        let config = LedgerConfig {
            tax_rate: Rate::new(dec!(-0.1)),
            ..LedgerConfig::default()
        };

        let result = LedgerEngine::open_files(config, &dir.storage());
        assert!(matches!(result, Err(LedgerError::InvalidConfig(_))));
    }

    #[test]
    fn test_sub_cent_commission_is_stored_exactly() {
        let dir = ScratchDir::new();
        let mut engine = file_engine(&dir, LedgerFixtures::config());

        let outcome = engine.record_sale(dec!(0.00004)).unwrap();

        assert_money_eq(&outcome.breakdown.commission, dec!(0.00004));
        assert_category_amount(engine.document(), Section::VariableRevenue, "Comissão", ACTUAL, dec!(0.00004));
        assert_category_amount(engine.document(), Section::Taxes, "Impostos", ACTUAL, dec!(95.5200064));

        let reloaded = JsonFileStore::new(dir.join(DOCUMENT_FILE)).load().unwrap();
        assert_category_amount(&reloaded, Section::VariableRevenue, "Comissão", ACTUAL, dec!(0.00004));
        assert_category_amount(&reloaded, Section::Taxes, "Impostos", ACTUAL, dec!(95.5200064));
    }

    #[test]
    fn test_commission_beyond_decimal_range_is_an_error() {
        let dir = ScratchDir::new();
        let mut engine = memory_engine(&dir, DocumentBuilder::standard().build_json(), LedgerFixtures::config());
        let before = engine.document().clone();

        let result = engine.record_sale(Decimal::MAX);

        assert!(matches!(result, Err(LedgerError::Money(MoneyError::Overflow))));
        assert_eq!(engine.document(), &before);
        assert_eq!(engine.store().save_count(), 0);
        assert!(!dir.join(AUDIT_FILE).exists());
    }

    #[test]
    fn test_running_total_overflow_leaves_document_unchanged() {
        let dir = ScratchDir::new();
        let json = DocumentBuilder::standard()
            .without(Section::FixedRevenue, "Mensalidade")
            .category(Section::FixedRevenue, "Receita Fixa - Mensalidade", Decimal::MAX)
            .build_json();
        let mut engine = memory_engine(&dir, json, LedgerFixtures::config());
        let before = engine.document().clone();

        test_utils::assert_err_variant!(engine.record_sale(dec!(150)), LedgerError::Money(MoneyError::Overflow));
        assert_eq!(engine.document(), &before);
        assert_eq!(engine.store().save_count(), 0);
        assert_category_amount(engine.document(), Section::FixedRevenue, "Mensalidade", ACTUAL, Decimal::MAX);
    }
}

// ============================================================================
// Batch Tests
// ============================================================================

mod batch_tests {
    use super::*;

    #[test]
    fn test_five_sale_batch() {
        let dir = ScratchDir::new();
        let mut engine = file_engine(&dir, LedgerFixtures::config());

        for commission in DEMO_COMMISSIONS {
            engine.record_sale(commission).unwrap();
        }

        let doc = engine.document();
        assert_category_amount(doc, Section::FixedRevenue, "Mensalidade", ACTUAL, dec!(2985));
        assert_category_amount(doc, Section::VariableRevenue, "Comissão", ACTUAL, dec!(925));
        assert_category_amount(doc, Section::Taxes, "Impostos", ACTUAL, dec!(625.60));
        assert_category_amount(doc, Section::VariableExpenses, "Servidor", ACTUAL, dec!(50));
        assert_category_amount(doc, Section::VariableExpenses, "Telefone", ACTUAL, dec!(150));
        assert_category_amount(doc, Section::VariableExpenses, "Whatsapp", ACTUAL, dec!(1000));

        let totals = engine.totals().unwrap();
        assert_money_eq(&totals.revenue, dec!(3910));
        assert_money_eq(&totals.cogs, dec!(1250));
        assert_money_eq(&totals.taxes, dec!(625.60));
        assert_money_eq(&totals.gross_result, dec!(2660));
        assert_money_eq(&totals.net_profit, dec!(2034.40));

        assert_audit_lines(&dir.join(AUDIT_FILE), 5);
    }

    #[test]
    fn test_batch_is_persisted_between_engines() {
        let dir = ScratchDir::new();
        {
            let mut engine = file_engine(&dir, LedgerFixtures::config());
            engine.record_sale(dec!(150)).unwrap();
            engine.record_sale(dec!(200)).unwrap();
        }

        let engine = LedgerEngine::open_files(LedgerFixtures::config(), &dir.storage()).unwrap();
        assert_category_amount(engine.document(), Section::VariableRevenue, "Comissão", ACTUAL, dec!(350));
        assert_category_amount(engine.document(), Section::FixedRevenue, "Mensalidade", ACTUAL, dec!(1194));
    }
}

// ============================================================================
// Persistence Tests
// ============================================================================

mod persistence_tests {
    use super::*;

    #[test]
    fn test_missing_document_fails_to_open() {
        let dir = ScratchDir::new();

        let result = LedgerEngine::open_files(LedgerFixtures::config(), &dir.storage());

        match result {
            Err(LedgerError::DocumentNotFound(path)) => assert_eq!(path, dir.join(DOCUMENT_FILE)),
            Err(other) => panic!("Expected DocumentNotFound, got {:?}", other),
            Ok(_) => panic!("Expected DocumentNotFound, got an engine"),
        }
    }

    #[test]
    fn test_malformed_document_fails_to_open() {
        let dir = ScratchDir::new();
        dir.write(DOCUMENT_FILE, "{ \"receitas\": ");

        let result = LedgerEngine::open_files(LedgerFixtures::config(), &dir.storage());
        assert!(matches!(result, Err(LedgerError::MalformedDocument(_))));
    }

    #[test]
    fn test_zero_sale_round_trip_is_lossless() {
        let dir = ScratchDir::new();
        let path = dir.write(DOCUMENT_FILE, SAMPLE_DOCUMENT_JSON);
        let store = JsonFileStore::new(&path);

        let document = store.load().unwrap();
        store.save(&document).unwrap();

        let original: Value = serde_json::from_str(SAMPLE_DOCUMENT_JSON).unwrap();
        let written: Value = serde_json::from_str(&dir.read(DOCUMENT_FILE)).unwrap();
        assert_eq!(original, written);
        assert_eq!(store.load().unwrap(), document);
    }

    #[test]
    fn test_sale_preserves_unmodelled_fields() {
        let dir = ScratchDir::new();
        let mut engine = file_engine(&dir, LedgerFixtures::config());

        engine.record_sale(dec!(150)).unwrap();

        let written: Value = serde_json::from_str(&dir.read(DOCUMENT_FILE)).unwrap();
        assert_eq!(written["metadados"]["empresa"], "Atende.ai");
        assert_eq!(written["despesas_fixas"]["pessoal"][0]["BP_2026"], 2500);
        assert_eq!(written["receitas"]["fixa"][0]["observacao"], "Plano mensal por cliente");
        assert_eq!(written["receitas"]["fixa"][0]["BP_2026"], 6000);
        assert_eq!(written["receitas"]["fixa"][0]["REAL_2026"], 597);
        assert_eq!(written["impostos"][0]["REAL_2026"], 119.52);
    }

    #[test]
    fn test_disk_matches_memory_after_sale() {
        let dir = ScratchDir::new();
        let mut engine = file_engine(&dir, LedgerFixtures::config());

        engine.record_sale(dec!(180)).unwrap();

        let reloaded = JsonFileStore::new(dir.join(DOCUMENT_FILE)).load().unwrap();
        assert_eq!(&reloaded, engine.document());
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_file() {
        let dir = ScratchDir::new();
        let mut engine = file_engine(&dir, LedgerFixtures::config());

        engine.record_sale(dec!(150)).unwrap();

        assert_eq!(dir.file_names(), vec![DOCUMENT_FILE.to_string(), AUDIT_FILE.to_string()]);
    }

    #[test]
    fn test_failed_save_keeps_memory_unchanged() {
        let dir = ScratchDir::new();
        let mut engine = file_engine(&dir, LedgerFixtures::config());
        let before = engine.document().clone();

        // A directory where the temp file should go makes the write fail
        fs::create_dir(dir.join("schema_financeiro.json.tmp")).unwrap();

        let result = engine.record_sale(dec!(150));
        assert!(matches!(result, Err(LedgerError::Persist { .. })));
        assert_eq!(engine.document(), &before);
        assert!(!dir.join(AUDIT_FILE).exists());
    }
}

// ============================================================================
// Audit Trail Tests
// ============================================================================

mod audit_tests {
    use super::*;

    #[test]
    fn test_sale_appends_audit_line() {
        let dir = ScratchDir::new();
        let mut engine = file_engine(&dir, LedgerFixtures::config());

        engine.record_sale(dec!(150)).unwrap();

        let lines = assert_audit_lines(&dir.join(AUDIT_FILE), 1);
        assert_eq!(
            lines[0],
            "2026-02-10 14:05:09 | Venda: R$   747.00 | COGS: R$ 250.00 | Impostos: R$   119.52 | Líquido: R$   377.48"
        );
    }

    #[test]
    fn test_audit_log_is_append_only() {
        let dir = ScratchDir::new();
        fs::write(dir.join(AUDIT_FILE), "linha anterior\n").unwrap();
        let mut engine = file_engine(&dir, LedgerFixtures::config());

        engine.record_sale(dec!(150)).unwrap();
        engine.record_sale(dec!(200)).unwrap();

        let lines = assert_audit_lines(&dir.join(AUDIT_FILE), 3);
        assert_eq!(lines[0], "linha anterior");
        assert!(lines[2].contains("Venda: R$   797.00"));
    }

    #[test]
    fn test_skipped_sale_is_still_audited() {
        let dir = ScratchDir::new();
        let json = DocumentBuilder::new().build_json();
        let mut engine = memory_engine(&dir, json, LedgerFixtures::config());

        engine.record_sale(dec!(150)).unwrap();

        assert_audit_lines(&dir.join(AUDIT_FILE), 1);
    }
}

// ============================================================================
// Category Lookup Tests
// ============================================================================

mod lookup_tests {
    use super::*;

    #[test]
    fn test_find_category_is_idempotent() {
        let dir = ScratchDir::new();
        let mut engine = file_engine(&dir, LedgerFixtures::config());

        let first = engine.find_category(Section::VariableExpenses, "tokens").cloned();
        let second = engine.find_category(Section::VariableExpenses, "tokens").cloned();
        assert_eq!(first, second);
        assert_eq!(first.unwrap().label, "Tokens GPT");

        engine.record_sale(dec!(150)).unwrap();
        let after = engine.find_category(Section::VariableExpenses, "tokens").unwrap();
        assert_eq!(after.label, "Tokens GPT");
    }

    #[test]
    fn test_find_category_missing() {
        let dir = ScratchDir::new();
        let engine = file_engine(&dir, LedgerFixtures::config());

        assert!(engine.find_category(Section::Taxes, "ICMS").is_none());
    }
}

// ============================================================================
// Payment Tests
// ============================================================================

mod payment_tests {
    use super::*;

    #[test]
    fn test_paid_sale() {
        let dir = ScratchDir::new();
        let mut engine = file_engine(&dir, LedgerFixtures::config());

        let outcome = engine
            .record_sale_with_payment(dec!(150), PaymentStatus::Paid, TemporalFixtures::today())
            .unwrap();

        assert!(!outcome.overdue);
        assert_eq!(outcome.effective_revenue, SaleFixtures::total_revenue());
        assert_money_zero(&outcome.delinquency);
        assert_eq!(outcome.net_balance, SaleFixtures::net_balance());
        assert_money_zero(&engine.delinquency_total().unwrap());
    }

    #[test]
    fn test_overdue_sale_books_delinquency() {
        let dir = ScratchDir::new();
        let mut engine = file_engine(&dir, LedgerFixtures::config());
        let status = PaymentStatus::Pending {
            due_date: TemporalFixtures::past_due_date(),
        };

        let outcome = engine
            .record_sale_with_payment(dec!(150), status, TemporalFixtures::today())
            .unwrap();

        assert!(outcome.overdue);
        assert_money_zero(&outcome.effective_revenue);
        assert_money_eq(&outcome.delinquency, dec!(747));
        assert_money_eq(&outcome.net_balance, dec!(-369.52));
        assert_money_eq(&engine.delinquency_total().unwrap(), dec!(747));

        // Categories are booked the same way as for a paid sale
        assert_category_amount(engine.document(), Section::FixedRevenue, "Mensalidade", ACTUAL, dec!(597));

        let written: Value = serde_json::from_str(&dir.read(DOCUMENT_FILE)).unwrap();
        assert_eq!(written["inadimplencia_total"], 747);

        let lines = assert_audit_lines(&dir.join(AUDIT_FILE), 1);
        assert_eq!(
            lines[0],
            "2026-02-10 14:05:09 | Efetivo: R$     0.00 | COGS: R$ 250.00 | Impostos: R$   119.52 | Inad: R$ 747.00 | Líquido: R$  -369.52"
        );
    }

    #[test]
    fn test_pending_sale_not_yet_due() {
        let dir = ScratchDir::new();
        let mut engine = file_engine(&dir, LedgerFixtures::config());
        let status = PaymentStatus::Pending {
            due_date: TemporalFixtures::future_due_date(),
        };

        let outcome = engine
            .record_sale_with_payment(dec!(150), status, TemporalFixtures::today())
            .unwrap();

        assert!(!outcome.overdue);
        assert_money_zero(&outcome.delinquency);
        assert_money_zero(&engine.delinquency_total().unwrap());
    }

    #[test]
    fn test_delinquency_accumulates() {
        let dir = ScratchDir::new();
        let json = DocumentBuilder::standard().build_json();
        let mut engine = memory_engine(&dir, json, LedgerFixtures::config());
        let status = PaymentStatus::Pending {
            due_date: TemporalFixtures::past_due_date(),
        };

        engine
            .record_sale_with_payment(dec!(150), status, TemporalFixtures::today())
            .unwrap();
        engine
            .record_sale_with_payment(dec!(200), status, TemporalFixtures::today())
            .unwrap();
        engine.record_sale(dec!(100)).unwrap();

        assert_money_eq(&engine.delinquency_total().unwrap(), dec!(1544));
        assert_audit_lines(&dir.join(AUDIT_FILE), 3);
    }
}

// ============================================================================
// Totals and Plan Comparison Tests
// ============================================================================

mod metrics_tests {
    use super::*;

    #[test]
    fn test_initial_totals_are_zero() {
        let dir = ScratchDir::new();
        let engine = file_engine(&dir, LedgerFixtures::config());

        let totals = engine.totals().unwrap();
        assert_money_zero(&totals.revenue);
        assert_money_zero(&totals.cogs);
        assert_money_zero(&totals.taxes);
        assert_money_zero(&totals.net_profit);
    }

    #[test]
    fn test_plan_comparison_after_batch() {
        let dir = ScratchDir::new();
        let mut engine = file_engine(&dir, LedgerFixtures::config());
        for commission in DEMO_COMMISSIONS {
            engine.record_sale(commission).unwrap();
        }

        let plan = engine.plan_comparison().unwrap();

        assert_money_eq(&plan.planned_revenue, dec!(7000));
        assert_money_eq(&plan.planned_cogs, dec!(2500));
        assert_money_eq(&plan.planned_taxes, dec!(1120));
        assert_money_eq(&plan.planned_fixed_expenses, dec!(2800));
        assert_money_eq(&plan.planned_net_profit, dec!(580));
        assert_money_eq(&plan.actual_net_profit, dec!(2034.40));
        assert_money_eq(&plan.gap, dec!(-1454.40));
        assert_money_zero(&plan.delinquency);
        assert_eq!(plan.other_variance, plan.gap);
    }

    #[test]
    fn test_plan_comparison_splits_out_delinquency() {
        let dir = ScratchDir::new();
        let mut engine = file_engine(&dir, LedgerFixtures::config());
        let status = PaymentStatus::Pending {
            due_date: TemporalFixtures::past_due_date(),
        };
        engine
            .record_sale_with_payment(dec!(150), status, TemporalFixtures::today())
            .unwrap();

        let plan = engine.plan_comparison().unwrap();

        assert_money_eq(&plan.delinquency, dec!(747));
        assert_eq!(plan.other_variance, plan.gap.checked_sub(&plan.delinquency).unwrap());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn net_balance_follows_formula(config in ledger_config_strategy(), commission in precise_commission_strategy()) {
            let breakdown = SaleBreakdown::compute(&config, commission).unwrap();

            let revenue = config.fixed_revenue_per_sale + commission;
            let costs: Decimal = config.unit_costs.iter().map(|cost| cost.amount).sum();
            let taxes = revenue * config.tax_rate.as_decimal();

            prop_assert_eq!(breakdown.commission.amount(), commission);
            prop_assert_eq!(breakdown.total_revenue.amount(), revenue);
            prop_assert_eq!(breakdown.total_cogs.amount(), costs);
            prop_assert_eq!(breakdown.taxes.amount(), taxes);
            prop_assert_eq!(breakdown.net_balance.amount(), revenue - costs - taxes);
        }

        #[test]
        fn sale_adds_exactly_its_amounts(actuals in starting_actuals_strategy(), commission in commission_strategy()) {
            let dir = ScratchDir::new();
            let json = document_with_actuals(&actuals).build_json();
            let mut engine = memory_engine(&dir, json, LedgerFixtures::config());

            let outcome = engine.record_sale(commission).unwrap();
            let b = &outcome.breakdown;

            let expected = [
                (Section::FixedRevenue, "Mensalidade", actuals[0] + b.fixed_revenue.amount()),
                (Section::VariableRevenue, "Comissão", actuals[1] + b.commission.amount()),
                (Section::Taxes, "Impostos", actuals[2] + b.taxes.amount()),
                (Section::VariableExpenses, "Servidor", actuals[3] + dec!(10)),
                (Section::VariableExpenses, "Tokens GPT", actuals[4] + dec!(10)),
                (Section::VariableExpenses, "Telefone", actuals[5] + dec!(30)),
                (Section::VariableExpenses, "Whatsapp", actuals[6] + dec!(200)),
            ];
            for (section, fragment, value) in expected {
                let category = engine.find_category(section, fragment).unwrap();
                prop_assert_eq!(category.amount(ACTUAL).unwrap(), value);
            }
        }

        #[test]
        fn totals_aggregate_every_sale(commissions in commission_batch_strategy(6)) {
            let dir = ScratchDir::new();
            let json = DocumentBuilder::standard().build_json();
            let mut engine = memory_engine(&dir, json, LedgerFixtures::config());

            let mut net = Money::brl(Decimal::ZERO);
            for commission in &commissions {
                net = net.checked_add(&engine.record_sale(*commission).unwrap().net_balance()).unwrap();
            }

            let n = Decimal::from(commissions.len() as u64);
            let sum: Decimal = commissions.iter().copied().sum();
            let totals = engine.totals().unwrap();
            prop_assert_eq!(totals.revenue.amount(), dec!(597) * n + sum);
            prop_assert_eq!(totals.cogs.amount(), dec!(250) * n);
            prop_assert_eq!(totals.net_profit, net);
        }

        #[test]
        fn find_category_result_matches_fragment(fragment in "[A-Za-z ]{0,8}") {
            let document = LedgerFixtures::document();
            for section in Section::ALL {
                let first = domain_ledger::find_category(document.section(section), &fragment);
                let second = domain_ledger::find_category(document.section(section), &fragment);
                prop_assert_eq!(first, second);
                if let Some(category) = first {
                    prop_assert!(category.matches_label(&fragment));
                }
            }
        }
    }
}
