//! Recurring revenue: MRR, trend points, and net run rate
//!
//! Only License items participate in MRR, and only once invoiced. Each
//! item contributes its evenly pro-rated monthly slice for the months its
//! coverage window touches.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, MonthWindow};
use domain_billing::{BillableItem, InvoiceType, ItemStatus};

use crate::config::EngineConfig;
use crate::revenue::sum_amounts;

/// One month of the MRR trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyMrrPoint {
    /// Month label, e.g. "Apr 2024"
    pub label: String,
    /// First day of the month
    pub month_start: NaiveDate,
    /// Pro-rated recurring revenue for the month
    pub mrr: Money,
}

fn is_recurring(item: &BillableItem) -> bool {
    item.invoice_type == InvoiceType::License && item.status.is_invoiced()
}

fn sum_monthly_rates<'a>(items: impl IntoIterator<Item = &'a BillableItem>) -> Money {
    let mut total = Decimal::ZERO;
    let mut currency: Option<Currency> = None;
    for item in items {
        let rate = item.monthly_rate();
        total += rate.amount();
        currency.get_or_insert(rate.currency());
    }
    Money::new(total, currency.unwrap_or_default())
}

/// Recurring revenue booked in the reference date's calendar month
///
/// An item counts when it was invoiced in that month; its contribution is
/// its monthly slice, not its full amount.
pub fn current_mrr(items: &[&BillableItem], as_of: NaiveDate) -> Money {
    sum_monthly_rates(items.iter().copied().filter(|item| {
        is_recurring(item)
            && item.invoice_date.map_or(false, |date| {
                date.year() == as_of.year() && date.month() == as_of.month()
            })
    }))
}

/// Recurring revenue attributable to one month of the trend
///
/// An item contributes when its coverage window touches the month. For
/// months up to the reference month the invoice must also exist by the
/// month's end; later months project forward from coverage alone.
pub fn monthly_mrr(items: &[&BillableItem], month: &MonthWindow, as_of: NaiveDate) -> Money {
    let is_future = (month.start.year(), month.start.month()) > (as_of.year(), as_of.month());
    sum_monthly_rates(items.iter().copied().filter(|item| {
        if !is_recurring(item) || !item.coverage_overlaps(month.start, month.end) {
            return false;
        }
        is_future || item.invoice_date.map_or(false, |date| date <= month.end)
    }))
}

/// MRR trend over a run of months, oldest first
pub fn mrr_trend(
    items: &[&BillableItem],
    months: &[MonthWindow],
    as_of: NaiveDate,
) -> Vec<MonthlyMrrPoint> {
    months
        .iter()
        .map(|month| MonthlyMrrPoint {
            label: month.label.clone(),
            month_start: month.start,
            mrr: monthly_mrr(items, month, as_of),
        })
        .collect()
}

/// Recurring run rate of one project over the current financial year
///
/// Sums the monthly slice of every invoiced license item whose coverage
/// touches the financial year containing the reference date.
pub fn project_mrr(
    items: &[&BillableItem],
    project_id: core_kernel::ProjectId,
    as_of: NaiveDate,
) -> Money {
    let fy = core_kernel::FinancialYear::containing(as_of);
    sum_monthly_rates(items.iter().copied().filter(|item| {
        item.project_id == project_id
            && is_recurring(item)
            && item.coverage_overlaps(fy.start(), fy.end())
    }))
}

/// Net run rate: current MRR plus amortized one-time revenue
///
/// One-time charges are not windowed; everything ever invoiced is spread
/// over the configured amortization horizon.
pub fn net_run_rate(items: &[&BillableItem], as_of: NaiveDate, config: &EngineConfig) -> Money {
    let mrr = current_mrr(items, as_of);
    let one_time = sum_amounts(items.iter().copied().filter(|item| {
        item.invoice_type == InvoiceType::OneTime
            && matches!(item.status, ItemStatus::Raised | ItemStatus::Received)
    }));
    let amortized = one_time.per_month(config.one_time_amortization_months);
    Money::new(mrr.amount() + amortized.amount(), mrr.currency())
}
