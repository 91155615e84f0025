//! Billing Domain - Billable Items and Purchase Orders
//!
//! This crate owns the invoiceable line items of the portal and the
//! purchase orders they draw down against.
//!
//! # Item lifecycle
//!
//! Items enter the workflow as `Pending` (or are created directly with a
//! status by an administrator). An approval action moves a pending item to
//! `Approved` or `NotApproved`; as invoicing progresses the item moves to
//! `Raised` and finally `Received`. An item in `Raised` or `Received`
//! must carry an invoice number, an invoice date, and an invoice document,
//! and its invoice date must not fall after the purchase order's end date.
//!
//! # Purchase-order linkage
//!
//! Items reference their purchase order by an immutable id; the external
//! `po_number` string and the PO end date are copied onto the item when
//! the PO is selected (copy-on-select - later PO edits never rewrite saved
//! items). Legacy records that predate the id link are still matched by
//! `po_number` string equality, and utilization warns when such a string
//! match crosses project boundaries.

pub mod item;
pub mod purchase_order;
pub mod lifecycle;
pub mod ports;
pub mod services;
pub mod error;

pub use item::{Attribution, BillableItem, InvoiceType, ItemStatus};
pub use purchase_order::{PurchaseOrder, Utilization, compute_utilization, cross_project_matches};
pub use lifecycle::{approve, reject, validate_billable_item};
pub use ports::{
    BillingStore, CreateBillableItemRequest, UpdateBillableItemRequest,
    CreatePurchaseOrderRequest, UpdatePurchaseOrderRequest,
};
pub use services::BillingService;
pub use error::BillingError;
