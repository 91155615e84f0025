//! Custom Test Assertions
//!
//! Specialized assertion helpers for domain types that give more
//! meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_billing::{BillableItem, ItemStatus};
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more
/// than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value is positive
pub fn assert_money_positive(money: &Money) {
    assert!(
        money.is_positive(),
        "Expected positive money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(
        money.is_zero(),
        "Expected zero money, got {} {}",
        money.currency().symbol(),
        money.amount()
    );
}

/// Asserts an item's status and that its invoice fields agree with it
pub fn assert_item_status(item: &BillableItem, expected: ItemStatus) {
    assert_eq!(
        item.status, expected,
        "Item {} status mismatch",
        item.name
    );
    if expected.is_invoiced() {
        assert!(
            item.invoice_number.is_some(),
            "Invoiced item {} is missing an invoice number",
            item.name
        );
        assert!(
            item.invoice_date.is_some(),
            "Invoiced item {} is missing an invoice date",
            item.name
        );
        assert!(
            item.invoice_document.is_some(),
            "Invoiced item {} is missing an invoice document",
            item.name
        );
    }
}
