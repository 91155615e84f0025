//! Revenue aggregates: totals, status splits, outstanding, collection time
//!
//! All functions take the already-filtered item set and degrade to zero
//! when nothing qualifies. The portal bills in a single currency; sums
//! carry the currency of the first contributing item and default to INR
//! when the set is empty.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};
use domain_billing::{BillableItem, InvoiceType, ItemStatus};

/// Sums item amounts without ever failing
pub(crate) fn sum_amounts<'a>(items: impl IntoIterator<Item = &'a BillableItem>) -> Money {
    let mut total = Decimal::ZERO;
    let mut currency: Option<Currency> = None;
    for item in items {
        total += item.amount.amount();
        currency.get_or_insert(item.amount.currency());
    }
    Money::new(total, currency.unwrap_or_default())
}

/// Realized revenue split by charge kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueBreakdown {
    /// Raised + Received, all types
    pub total: Money,
    /// Raised + Received license revenue (the ARR figure)
    pub license: Money,
    /// Raised + Received one-time revenue
    pub one_time: Money,
}

/// Amounts split by invoicing status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSplit {
    /// Invoiced, payment outstanding
    pub raised: Money,
    /// Invoiced and paid
    pub received: Money,
}

/// Total revenue over invoiced (Raised/Received) items
pub fn total_revenue(items: &[&BillableItem]) -> RevenueBreakdown {
    let invoiced: Vec<&BillableItem> = items
        .iter()
        .copied()
        .filter(|item| item.status.is_invoiced())
        .collect();

    RevenueBreakdown {
        total: sum_amounts(invoiced.iter().copied()),
        license: sum_amounts(
            invoiced
                .iter()
                .copied()
                .filter(|i| i.invoice_type == InvoiceType::License),
        ),
        one_time: sum_amounts(
            invoiced
                .iter()
                .copied()
                .filter(|i| i.invoice_type == InvoiceType::OneTime),
        ),
    }
}

/// Amount invoiced but not yet paid (status Raised only)
pub fn outstanding(items: &[&BillableItem]) -> Money {
    sum_amounts(
        items
            .iter()
            .copied()
            .filter(|item| item.status == ItemStatus::Raised),
    )
}

/// Raised/Received split for one charge kind
pub fn by_status_for_type(items: &[&BillableItem], invoice_type: InvoiceType) -> StatusSplit {
    let of_type = |status: ItemStatus| {
        sum_amounts(
            items
                .iter()
                .copied()
                .filter(|i| i.invoice_type == invoice_type && i.status == status),
        )
    };
    StatusSplit {
        raised: of_type(ItemStatus::Raised),
        received: of_type(ItemStatus::Received),
    }
}

/// Mean days from invoice to payment over paid items
///
/// Only Received items carrying both dates qualify; returns 0.0 when none
/// do.
pub fn average_collection_days(items: &[&BillableItem]) -> f64 {
    let spans: Vec<i64> = items
        .iter()
        .filter(|item| item.status == ItemStatus::Received)
        .filter_map(|item| {
            let invoice = item.invoice_date?;
            let payment = item.payment_date?;
            Some((payment - invoice).num_days())
        })
        .collect();

    if spans.is_empty() {
        return 0.0;
    }
    spans.iter().sum::<i64>() as f64 / spans.len() as f64
}
