//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants, plus fake-data helpers for realistic names.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use domain_billing::{InvoiceType, ItemStatus};
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::INR),
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::SGD),
        Just(Currency::AED),
    ]
}

/// Strategy for generating non-negative amounts in minor units
pub fn amount_minor_strategy() -> impl Strategy<Value = i64> {
    0i64..1_000_000_000i64
}

/// Strategy for generating non-negative Money values
pub fn money_strategy() -> impl Strategy<Value = Money> {
    (amount_minor_strategy(), currency_strategy())
        .prop_map(|(amount, currency)| Money::from_minor(amount, currency))
}

/// Strategy for generating non-negative INR Money values
pub fn inr_money_strategy() -> impl Strategy<Value = Money> {
    amount_minor_strategy().prop_map(|amount| Money::from_minor(amount, Currency::INR))
}

/// Strategy for generating dates within the 2020-2030 decade
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2030, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d).expect("day <= 28 is valid in every month")
    })
}

/// Strategy for generating an ordered coverage window
pub fn coverage_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (date_strategy(), 0i64..730).prop_map(|(start, days)| {
        (start, start + chrono::Duration::days(days))
    })
}

/// Strategy for generating invoice types
pub fn invoice_type_strategy() -> impl Strategy<Value = InvoiceType> {
    prop_oneof![
        Just(InvoiceType::License),
        Just(InvoiceType::OneTime),
        Just(InvoiceType::Others),
    ]
}

/// Strategy for generating item statuses
pub fn item_status_strategy() -> impl Strategy<Value = ItemStatus> {
    prop_oneof![
        Just(ItemStatus::Pending),
        Just(ItemStatus::Approved),
        Just(ItemStatus::NotApproved),
        Just(ItemStatus::Raised),
        Just(ItemStatus::Received),
    ]
}

/// Strategy for generating rates in [0, 1] with four decimals
pub fn rate_decimal_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10000u32).prop_map(|n| Decimal::new(n as i64, 4))
}

/// A realistic company name for client records
pub fn fake_company_name() -> String {
    CompanyName().fake()
}

/// A realistic person name for attribution fields
pub fn fake_person_name() -> String {
    Name().fake()
}
