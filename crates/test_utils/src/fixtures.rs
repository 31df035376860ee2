//! Pre-built Test Fixtures
//!
//! Provides ready-to-use ledger data. These fixtures are consistent and
//! predictable so that tests can assert on exact figures.

use chrono::{NaiveDate, NaiveDateTime};
use core_kernel::Money;
use domain_ledger::{FinancialDocument, LedgerConfig};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A complete financial document with zeroed actuals and a business plan
///
/// Carries fields the engine does not model (`observacao`, `despesas_fixas`,
/// `metadados`) so preservation can be checked.
pub const SAMPLE_DOCUMENT_JSON: &str = r#"{
  "receitas": {
    "fixa": [
      {
        "label": "Receita Fixa - Mensalidade",
        "BP_2026": 6000,
        "REAL_2026": 0,
        "observacao": "Plano mensal por cliente"
      }
    ],
    "variavel": [
      {
        "label": "Receita Variável - Comissão",
        "BP_2026": 1000,
        "REAL_2026": 0
      }
    ]
  },
  "impostos": [
    {
      "label": "Impostos",
      "BP_2026": 1120,
      "REAL_2026": 0
    }
  ],
  "despesas_variaveis": [
    {
      "label": "Servidor",
      "BP_2026": 100,
      "REAL_2026": 0
    },
    {
      "label": "Tokens GPT",
      "BP_2026": 100,
      "REAL_2026": 0
    },
    {
      "label": "Telefone",
      "BP_2026": 300,
      "REAL_2026": 0
    },
    {
      "label": "API Oficial Whatsapp",
      "BP_2026": 2000,
      "REAL_2026": 0
    }
  ],
  "despesas_fixas": {
    "pessoal": [
      {
        "label": "Salários",
        "BP_2026": 2500
      }
    ],
    "administrativas": [
      {
        "label": "Contabilidade",
        "BP_2026": 300
      }
    ]
  },
  "inadimplencia_total": 0,
  "metadados": {
    "empresa": "Atende.ai",
    "moeda": "BRL"
  }
}"#;

/// Commissions of the demo batch
pub const DEMO_COMMISSIONS: [Decimal; 5] = [dec!(150), dec!(200), dec!(180), dec!(220), dec!(175)];

/// Fixture for ledger documents and configuration
pub struct LedgerFixtures;

impl LedgerFixtures {
    /// The parsed sample document
    pub fn document() -> FinancialDocument {
        FinancialDocument::from_json(SAMPLE_DOCUMENT_JSON).unwrap()
    }

    /// The default configuration
    pub fn config() -> LedgerConfig {
        LedgerConfig::default()
    }

    /// The default configuration with strict category lookup
    pub fn strict_config() -> LedgerConfig {
        LedgerConfig {
            strict_categories: true,
            ..LedgerConfig::default()
        }
    }
}

/// Fixture for amounts of the reference sale (commission 150)
pub struct SaleFixtures;

impl SaleFixtures {
    pub fn total_revenue() -> Money {
        Money::brl(dec!(747.00))
    }

    pub fn total_cogs() -> Money {
        Money::brl(dec!(250.00))
    }

    pub fn taxes() -> Money {
        Money::brl(dec!(119.52))
    }

    pub fn net_balance() -> Money {
        Money::brl(dec!(377.48))
    }
}

/// Fixture for dates and timestamps
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Fixed audit timestamp (2026-02-10 14:05:09)
    pub fn timestamp() -> NaiveDateTime {
        Self::today().and_hms_opt(14, 5, 9).unwrap()
    }

    /// Reference "today" for payment tests
    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()
    }

    /// A due date already past on `today()`
    pub fn past_due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
    }

    /// A due date still ahead of `today()`
    pub fn future_due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }
}
