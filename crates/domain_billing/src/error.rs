//! Billing domain errors

use chrono::NaiveDate;
use thiserror::Error;

use core_kernel::{BillableItemId, ClientId, MoneyError, PortError, ProjectId, PurchaseOrderId};

use crate::item::ItemStatus;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// No purchase order was selected for the item
    #[error("A purchase order must be selected before saving a billable item")]
    MissingPurchaseOrder,

    /// Raised/Received item without an invoice number
    #[error("Invoice number is required once an invoice is raised")]
    MissingInvoiceNumber,

    /// Raised/Received item without an invoice date
    #[error("Invoice date is required once an invoice is raised")]
    MissingInvoiceDate,

    /// Raised/Received item without an invoice document
    #[error("Invoice document is required once an invoice is raised")]
    MissingInvoiceDocument,

    /// Invoice dated after the purchase order ends
    #[error("Invoice date {invoice_date} falls after purchase order end {po_end_date}")]
    InvoiceAfterPoEnd {
        invoice_date: NaiveDate,
        po_end_date: NaiveDate,
    },

    /// Item amounts must be non-negative
    #[error("Billable amount must not be negative")]
    NegativeAmount,

    /// Approval/rejection applied outside Pending
    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidStatusTransition { from: ItemStatus, to: ItemStatus },

    /// Billable item not found
    #[error("Billable item not found: {0}")]
    ItemNotFound(BillableItemId),

    /// Purchase order not found
    #[error("Purchase order not found: {0}")]
    PurchaseOrderNotFound(PurchaseOrderId),

    /// Project reference does not resolve
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Write attempted under an inactive client
    #[error("Client {0} is inactive; writes are blocked")]
    InactiveClient(ClientId),

    /// Money arithmetic failure
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Store failure, propagated unchanged
    #[error(transparent)]
    Store(#[from] PortError),
}
