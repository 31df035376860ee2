//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for ledger types that give
//! more meaningful error messages than standard assertions.

use std::path::Path;

use core_kernel::Money;
use domain_ledger::{find_category, FinancialDocument, Section};
use rust_decimal::Decimal;

/// Asserts that a Money value has exactly the expected amount
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "Money amount mismatch: actual={}, expected={} {}",
        actual,
        actual.currency().symbol(),
        expected
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(money.is_zero(), "Expected zero money, got {}", money);
}

/// Asserts the value of `field` in the first category of `section` whose
/// label contains `fragment`
pub fn assert_category_amount(
    document: &FinancialDocument,
    section: Section,
    fragment: &str,
    field: &str,
    expected: Decimal,
) {
    let category = find_category(document.section(section), fragment)
        .unwrap_or_else(|| panic!("No category matching {:?} in {}", fragment, section));
    let actual = category
        .amount(field)
        .unwrap_or_else(|e| panic!("Category {:?} has no usable {}: {}", category.label, field, e));
    assert_eq!(
        actual, expected,
        "Category {:?} field {}: actual={}, expected={}",
        category.label, field, actual, expected
    );
}

/// Reads the audit log and asserts its number of lines
///
/// Returns the lines for further checks.
pub fn assert_audit_lines(path: &Path, expected: usize) -> Vec<String> {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Cannot read audit log {}: {}", path.display(), e));
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    assert_eq!(
        lines.len(),
        expected,
        "Audit log {} has {} lines, expected {}",
        path.display(),
        lines.len(),
        expected
    );
    lines
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(_) => panic!("Expected Err matching {}, got Ok", stringify!($pattern)),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
