//! Billing domain ports
//!
//! `BillingStore` defines the CRUD surface the billing domain needs from
//! its backing store. Writes are last-writer-wins upserts; the store
//! carries no version field and performs no optimistic-concurrency check.

use async_trait::async_trait;
use chrono::NaiveDate;

use core_kernel::{
    BillableItemId, DocumentId, DomainPort, Money, PortError, ProjectId, PurchaseOrderId,
};

use crate::item::{Attribution, BillableItem, InvoiceType, ItemStatus};
use crate::purchase_order::PurchaseOrder;

/// Request for creating a billable item
///
/// `purchase_order_id` is optional in the type but required by the
/// service: creation without a selected PO fails with
/// `MissingPurchaseOrder` before any other check runs.
#[derive(Debug, Clone)]
pub struct CreateBillableItemRequest {
    pub project_id: ProjectId,
    pub name: String,
    pub invoice_type: InvoiceType,
    pub amount: Money,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub purchase_order_id: Option<PurchaseOrderId>,
    /// Administrative creates may enter the workflow at any status
    pub status: Option<ItemStatus>,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub payment_date: Option<NaiveDate>,
    pub proposal_document: Option<DocumentId>,
    pub invoice_document: Option<DocumentId>,
    pub attribution: Attribution,
}

/// Request for updating a billable item
///
/// Fields left as `None` keep their current value. A PO must be selected
/// for the edit to save: either re-supplied here or already present on
/// the item.
#[derive(Debug, Clone, Default)]
pub struct UpdateBillableItemRequest {
    pub name: Option<String>,
    pub invoice_type: Option<InvoiceType>,
    pub status: Option<ItemStatus>,
    pub amount: Option<Money>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub purchase_order_id: Option<PurchaseOrderId>,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub payment_date: Option<NaiveDate>,
    pub proposal_document: Option<DocumentId>,
    pub invoice_document: Option<DocumentId>,
    pub attribution: Option<Attribution>,
}

/// Request for creating a purchase order
#[derive(Debug, Clone)]
pub struct CreatePurchaseOrderRequest {
    pub project_id: ProjectId,
    pub name: String,
    pub po_number: String,
    pub po_value: Money,
    pub end_date: Option<NaiveDate>,
    pub document: Option<DocumentId>,
}

/// Request for updating a purchase order
///
/// Edits apply to the PO record only; items that already copied this PO's
/// number and end date keep their saved values (copy-on-select).
#[derive(Debug, Clone, Default)]
pub struct UpdatePurchaseOrderRequest {
    pub name: Option<String>,
    pub po_number: Option<String>,
    pub po_value: Option<Money>,
    pub end_date: Option<NaiveDate>,
    pub document: Option<DocumentId>,
}

/// Port trait for billing persistence
#[async_trait]
pub trait BillingStore: DomainPort {
    // Billable items

    /// Lists all billable items
    async fn list_items(&self) -> Result<Vec<BillableItem>, PortError>;

    /// Retrieves an item by id, or `PortError::NotFound`
    async fn get_item(&self, id: BillableItemId) -> Result<BillableItem, PortError>;

    /// Lists items owned by a project
    async fn items_for_project(&self, project_id: ProjectId)
        -> Result<Vec<BillableItem>, PortError>;

    /// Lists items whose copied `po_number` equals the given string
    ///
    /// Compatibility lookup for records without an id link.
    async fn items_for_po_number(&self, po_number: &str)
        -> Result<Vec<BillableItem>, PortError>;

    /// Persists a new item
    async fn create_item(&self, item: &BillableItem) -> Result<(), PortError>;

    /// Upserts an item record (last writer wins, no version check)
    async fn update_item(&self, item: &BillableItem) -> Result<(), PortError>;

    /// Removes an item record; no cascading side effects
    async fn delete_item(&self, id: BillableItemId) -> Result<(), PortError>;

    // Purchase orders

    /// Lists all purchase orders
    async fn list_purchase_orders(&self) -> Result<Vec<PurchaseOrder>, PortError>;

    /// Retrieves a purchase order by id, or `PortError::NotFound`
    async fn get_purchase_order(&self, id: PurchaseOrderId)
        -> Result<PurchaseOrder, PortError>;

    /// Lists purchase orders owned by a project
    async fn purchase_orders_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<PurchaseOrder>, PortError>;

    /// Persists a new purchase order
    async fn create_purchase_order(&self, po: &PurchaseOrder) -> Result<(), PortError>;

    /// Upserts a purchase order record
    async fn update_purchase_order(&self, po: &PurchaseOrder) -> Result<(), PortError>;

    /// Removes a purchase order record
    async fn delete_purchase_order(&self, id: PurchaseOrderId) -> Result<(), PortError>;
}
