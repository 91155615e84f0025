//! Purchase orders and utilization
//!
//! Utilization is derived, never stored: it is recomputed from the
//! billable items linked to the purchase order at the time of asking.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

use core_kernel::{BillableItemId, DocumentId, Money, ProjectId, PurchaseOrderId};

use crate::item::BillableItem;

/// A client-authorized spending ceiling for a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Unique identifier
    pub id: PurchaseOrderId,
    /// Owning project
    pub project_id: ProjectId,
    /// Display name
    pub name: String,
    /// External PO number; the client's identifier, not guaranteed unique
    /// across projects
    pub po_number: String,
    /// Authorized ceiling
    pub po_value: Money,
    /// Date the authorization ends
    pub end_date: Option<NaiveDate>,
    /// PO document reference
    pub document: Option<DocumentId>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl PurchaseOrder {
    /// Creates a new purchase order
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        po_number: impl Into<String>,
        po_value: Money,
    ) -> Self {
        Self {
            id: PurchaseOrderId::new(),
            project_id,
            name: name.into(),
            po_number: po_number.into(),
            po_value,
            end_date: None,
            document: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the end date
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

/// Derived consumption figures for a purchase order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utilization {
    /// Sum of linked item amounts
    pub utilized: Money,
    /// Ceiling minus utilized; negative signals overrun
    pub remaining: Money,
    /// Consumed share of the ceiling, clamped to [0, 100]
    pub percentage: Decimal,
}

/// Computes utilization of a purchase order against the full item set
///
/// The percentage clamps at 100 even when over-utilized; `remaining` is
/// not clamped and goes negative to signal the overrun. A zero-value PO
/// reports 100% as soon as anything draws on it.
pub fn compute_utilization(po: &PurchaseOrder, items: &[BillableItem]) -> Utilization {
    let currency = po.po_value.currency();
    let linked: Vec<&BillableItem> = items
        .iter()
        .filter(|item| item.links_to(po.id, &po.po_number))
        .collect();

    for item in &linked {
        if item.purchase_order_id.is_none() && item.project_id != po.project_id {
            warn!(
                po_number = %po.po_number,
                item_id = %item.id,
                item_project = %item.project_id,
                po_project = %po.project_id,
                "po_number string match crosses project boundary"
            );
        }
    }

    let utilized = linked
        .iter()
        .fold(Money::zero(currency), |acc, item| acc + item.amount);
    let remaining = po.po_value - utilized;

    let percentage = if po.po_value.is_zero() {
        if utilized.is_positive() {
            dec!(100)
        } else {
            dec!(0)
        }
    } else {
        let raw = utilized.amount() / po.po_value.amount() * dec!(100);
        raw.min(dec!(100))
    };

    Utilization {
        utilized,
        remaining,
        percentage,
    }
}

/// Returns legacy string-matched items whose project differs from the PO's
///
/// These are the records the id-link migration exists for; callers can
/// surface them for data correction.
pub fn cross_project_matches(po: &PurchaseOrder, items: &[BillableItem]) -> Vec<BillableItemId> {
    items
        .iter()
        .filter(|item| {
            item.purchase_order_id.is_none()
                && item.po_number.as_deref() == Some(po.po_number.as_str())
                && item.project_id != po.project_id
        })
        .map(|item| item.id)
        .collect()
}
