//! Billable item aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{
    fiscal, BillableItemId, DocumentId, Money, ProjectId, PurchaseOrderId,
};

/// Kind of charge the item represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceType {
    /// Recurring license fee, pro-rated across its coverage window
    License,
    /// One-time charge (implementation, services)
    OneTime,
    /// Anything else
    Others,
}

/// Billable item workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    /// Awaiting approval (workflow entry point)
    Pending,
    /// Approved for invoicing
    Approved,
    /// Rejected during approval
    NotApproved,
    /// Invoice raised, payment outstanding
    Raised,
    /// Payment received
    Received,
}

impl ItemStatus {
    /// Returns true once an invoice exists for the item
    ///
    /// Invoiced items must carry invoice number, date, and document.
    pub fn is_invoiced(&self) -> bool {
        matches!(self, ItemStatus::Raised | ItemStatus::Received)
    }
}

/// Who sold, ran, and invoiced the work
///
/// Names are free-form; the team/department breakdown in analytics groups
/// by these strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub sales_manager: Option<String>,
    pub project_manager: Option<String>,
    pub cx_manager: Option<String>,
    pub invoice_raised_by: Option<String>,
}

/// A single invoiceable line tied to a project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillableItem {
    /// Unique identifier
    pub id: BillableItemId,
    /// Owning project
    pub project_id: ProjectId,
    /// Display name
    pub name: String,
    /// Charge kind
    pub invoice_type: InvoiceType,
    /// Workflow status
    pub status: ItemStatus,
    /// Linked purchase order (immutable id reference)
    pub purchase_order_id: Option<PurchaseOrderId>,
    /// PO number copied from the selected purchase order
    ///
    /// Kept as a compatibility shim for records that predate the id link;
    /// never edited independently of PO selection.
    pub po_number: Option<String>,
    /// PO end date copied from the selected purchase order
    pub po_end_date: Option<NaiveDate>,
    /// Billed amount (non-negative)
    pub amount: Money,
    /// Coverage window start (pro-ration basis for licenses)
    pub start_date: NaiveDate,
    /// Coverage window end
    pub end_date: NaiveDate,
    /// Invoice number once raised
    pub invoice_number: Option<String>,
    /// Invoice date once raised
    pub invoice_date: Option<NaiveDate>,
    /// Payment date once received
    pub payment_date: Option<NaiveDate>,
    /// PO document reference
    pub po_document: Option<DocumentId>,
    /// Proposal document reference
    pub proposal_document: Option<DocumentId>,
    /// Invoice document reference
    pub invoice_document: Option<DocumentId>,
    /// Attribution fields
    pub attribution: Attribution,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl BillableItem {
    /// Creates a new pending item
    pub fn new(
        project_id: ProjectId,
        name: impl Into<String>,
        invoice_type: InvoiceType,
        amount: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BillableItemId::new(),
            project_id,
            name: name.into(),
            invoice_type,
            status: ItemStatus::Pending,
            purchase_order_id: None,
            po_number: None,
            po_end_date: None,
            amount,
            start_date,
            end_date,
            invoice_number: None,
            invoice_date: None,
            payment_date: None,
            po_document: None,
            proposal_document: None,
            invoice_document: None,
            attribution: Attribution::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Number of calendar months the coverage window spans (minimum 1)
    pub fn months_spanned(&self) -> u32 {
        fiscal::months_spanned(self.start_date, self.end_date)
    }

    /// Monthly value of the item under even pro-ration
    pub fn monthly_rate(&self) -> Money {
        self.amount.per_month(self.months_spanned())
    }

    /// Returns true if the coverage window overlaps the given range
    pub fn coverage_overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }

    /// Returns true if this item draws down the given purchase order
    ///
    /// The id link wins; the `po_number` string match only applies to
    /// legacy records without an id link.
    pub fn links_to(&self, po_id: PurchaseOrderId, po_number: &str) -> bool {
        match self.purchase_order_id {
            Some(linked) => linked == po_id,
            None => self.po_number.as_deref() == Some(po_number),
        }
    }

    /// Copies the PO linkage fields from a selected purchase order
    pub fn sync_purchase_order(
        &mut self,
        po_id: PurchaseOrderId,
        po_number: &str,
        po_end_date: Option<NaiveDate>,
    ) {
        self.purchase_order_id = Some(po_id);
        self.po_number = Some(po_number.to_string());
        self.po_end_date = po_end_date;
        self.updated_at = Utc::now();
    }
}
