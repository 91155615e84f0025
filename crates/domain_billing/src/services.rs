//! Billing domain services
//!
//! `BillingService` orchestrates item and purchase-order writes: the
//! inactive-client guard, PO selection and copy-on-select sync, lifecycle
//! validation, and the project-deletion cascade. Every check runs before
//! the first store write.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, instrument};

use core_kernel::{BillableItemId, DocumentId, ProjectId, PurchaseOrderId};
use domain_directory::{DirectoryStore, Project};

use crate::error::BillingError;
use crate::item::{BillableItem, ItemStatus};
use crate::lifecycle::{approve, reject, validate_billable_item};
use crate::ports::{
    BillingStore, CreateBillableItemRequest, CreatePurchaseOrderRequest,
    UpdateBillableItemRequest, UpdatePurchaseOrderRequest,
};
use crate::purchase_order::{compute_utilization, PurchaseOrder, Utilization};

/// Application service for the billing domain
pub struct BillingService {
    store: Arc<dyn BillingStore>,
    directory: Arc<dyn DirectoryStore>,
}

impl BillingService {
    /// Creates a new billing service over the given adapters
    pub fn new(store: Arc<dyn BillingStore>, directory: Arc<dyn DirectoryStore>) -> Self {
        Self { store, directory }
    }

    // ========================================================================
    // Purchase orders
    // ========================================================================

    /// Creates a purchase order under an existing, active client's project
    #[instrument(skip(self, request), fields(project_id = %request.project_id, po_number = %request.po_number))]
    pub async fn create_purchase_order(
        &self,
        request: CreatePurchaseOrderRequest,
    ) -> Result<PurchaseOrder, BillingError> {
        self.ensure_project_writable(request.project_id).await?;
        if request.po_value.is_negative() {
            return Err(BillingError::NegativeAmount);
        }

        let mut po = PurchaseOrder::new(
            request.project_id,
            request.name,
            request.po_number,
            request.po_value,
        );
        po.end_date = request.end_date;
        po.document = request.document;

        self.store.create_purchase_order(&po).await?;
        debug!(po_id = %po.id, "purchase order created");
        Ok(po)
    }

    /// Updates a purchase order record
    ///
    /// Items that already copied this PO's number and end date keep their
    /// saved values; only future selections see the edit.
    #[instrument(skip(self, request))]
    pub async fn update_purchase_order(
        &self,
        id: PurchaseOrderId,
        request: UpdatePurchaseOrderRequest,
    ) -> Result<PurchaseOrder, BillingError> {
        let mut po = self.get_purchase_order(id).await?;
        self.ensure_project_writable(po.project_id).await?;

        if let Some(name) = request.name {
            po.name = name;
        }
        if let Some(po_number) = request.po_number {
            po.po_number = po_number;
        }
        if let Some(po_value) = request.po_value {
            if po_value.is_negative() {
                return Err(BillingError::NegativeAmount);
            }
            po.po_value = po_value;
        }
        if let Some(end_date) = request.end_date {
            po.end_date = Some(end_date);
        }
        if let Some(document) = request.document {
            po.document = Some(document);
        }

        self.store.update_purchase_order(&po).await?;
        Ok(po)
    }

    /// Fetches a purchase order
    pub async fn get_purchase_order(
        &self,
        id: PurchaseOrderId,
    ) -> Result<PurchaseOrder, BillingError> {
        self.store.get_purchase_order(id).await.map_err(|err| {
            if err.is_not_found() {
                BillingError::PurchaseOrderNotFound(id)
            } else {
                err.into()
            }
        })
    }

    /// Lists all purchase orders
    pub async fn list_purchase_orders(&self) -> Result<Vec<PurchaseOrder>, BillingError> {
        Ok(self.store.list_purchase_orders().await?)
    }

    /// Removes a purchase order record
    #[instrument(skip(self))]
    pub async fn delete_purchase_order(&self, id: PurchaseOrderId) -> Result<(), BillingError> {
        let po = self.get_purchase_order(id).await?;
        self.ensure_project_writable(po.project_id).await?;
        self.store.delete_purchase_order(id).await?;
        Ok(())
    }

    /// Computes current utilization for a purchase order
    ///
    /// Derived on every call; nothing is stored. Draws come from the
    /// PO's own project plus any record elsewhere that still carries the
    /// copied PO number without an id link.
    pub async fn utilization(&self, id: PurchaseOrderId) -> Result<Utilization, BillingError> {
        let po = self.get_purchase_order(id).await?;
        let mut items = self.store.items_for_project(po.project_id).await?;
        for item in self.store.items_for_po_number(&po.po_number).await? {
            if !items.iter().any(|existing| existing.id == item.id) {
                items.push(item);
            }
        }
        Ok(compute_utilization(&po, &items))
    }

    // ========================================================================
    // Billable items
    // ========================================================================

    /// Creates a billable item against a selected purchase order
    #[instrument(skip(self, request), fields(project_id = %request.project_id, name = %request.name))]
    pub async fn create_item(
        &self,
        request: CreateBillableItemRequest,
    ) -> Result<BillableItem, BillingError> {
        self.ensure_project_writable(request.project_id).await?;

        // PO selection is required before any other lifecycle check
        let po_id = request
            .purchase_order_id
            .ok_or(BillingError::MissingPurchaseOrder)?;
        let po = self.get_purchase_order(po_id).await?;

        let mut item = BillableItem::new(
            request.project_id,
            request.name,
            request.invoice_type,
            request.amount,
            request.start_date,
            request.end_date,
        );
        if let Some(status) = request.status {
            item.status = status;
        }
        item.invoice_number = request.invoice_number;
        item.invoice_date = request.invoice_date;
        item.payment_date = request.payment_date;
        item.proposal_document = request.proposal_document;
        item.invoice_document = request.invoice_document;
        item.attribution = request.attribution;
        item.sync_purchase_order(po.id, &po.po_number, po.end_date);
        item.po_document = po.document;

        validate_billable_item(&item)?;
        self.store.create_item(&item).await?;
        debug!(item_id = %item.id, "billable item created");
        Ok(item)
    }

    /// Updates a billable item
    ///
    /// A purchase order must be selected: either re-supplied in the
    /// request (re-syncing the copied PO fields) or already on the item.
    #[instrument(skip(self, request))]
    pub async fn update_item(
        &self,
        id: BillableItemId,
        request: UpdateBillableItemRequest,
    ) -> Result<BillableItem, BillingError> {
        let mut item = self.get_item(id).await?;
        self.ensure_project_writable(item.project_id).await?;

        match request.purchase_order_id {
            Some(po_id) => {
                let po = self.get_purchase_order(po_id).await?;
                item.sync_purchase_order(po.id, &po.po_number, po.end_date);
            }
            None => {
                if item.purchase_order_id.is_none() {
                    return Err(BillingError::MissingPurchaseOrder);
                }
            }
        }

        if let Some(name) = request.name {
            item.name = name;
        }
        if let Some(invoice_type) = request.invoice_type {
            item.invoice_type = invoice_type;
        }
        if let Some(status) = request.status {
            item.status = status;
        }
        if let Some(amount) = request.amount {
            item.amount = amount;
        }
        if let Some(start_date) = request.start_date {
            item.start_date = start_date;
        }
        if let Some(end_date) = request.end_date {
            item.end_date = end_date;
        }
        if let Some(invoice_number) = request.invoice_number {
            item.invoice_number = Some(invoice_number);
        }
        if let Some(invoice_date) = request.invoice_date {
            item.invoice_date = Some(invoice_date);
        }
        if let Some(payment_date) = request.payment_date {
            item.payment_date = Some(payment_date);
        }
        if let Some(proposal_document) = request.proposal_document {
            item.proposal_document = Some(proposal_document);
        }
        if let Some(invoice_document) = request.invoice_document {
            item.invoice_document = Some(invoice_document);
        }
        if let Some(attribution) = request.attribution {
            item.attribution = attribution;
        }
        item.updated_at = chrono::Utc::now();

        validate_billable_item(&item)?;
        self.store.update_item(&item).await?;
        Ok(item)
    }

    /// Approves a pending item
    #[instrument(skip(self))]
    pub async fn approve_item(&self, id: BillableItemId) -> Result<BillableItem, BillingError> {
        let mut item = self.get_item(id).await?;
        self.ensure_project_writable(item.project_id).await?;
        approve(&mut item)?;
        self.store.update_item(&item).await?;
        debug!(item_id = %id, "item approved");
        Ok(item)
    }

    /// Rejects a pending item
    #[instrument(skip(self))]
    pub async fn reject_item(&self, id: BillableItemId) -> Result<BillableItem, BillingError> {
        let mut item = self.get_item(id).await?;
        self.ensure_project_writable(item.project_id).await?;
        reject(&mut item)?;
        self.store.update_item(&item).await?;
        debug!(item_id = %id, "item rejected");
        Ok(item)
    }

    /// Moves an item to `Raised` with its invoice metadata
    #[instrument(skip(self))]
    pub async fn mark_raised(
        &self,
        id: BillableItemId,
        invoice_number: String,
        invoice_date: NaiveDate,
        invoice_document: DocumentId,
    ) -> Result<BillableItem, BillingError> {
        let mut item = self.get_item(id).await?;
        self.ensure_project_writable(item.project_id).await?;

        item.status = ItemStatus::Raised;
        item.invoice_number = Some(invoice_number);
        item.invoice_date = Some(invoice_date);
        item.invoice_document = Some(invoice_document);
        item.updated_at = chrono::Utc::now();

        validate_billable_item(&item)?;
        self.store.update_item(&item).await?;
        Ok(item)
    }

    /// Moves an item to `Received`, recording the payment date
    #[instrument(skip(self))]
    pub async fn mark_received(
        &self,
        id: BillableItemId,
        payment_date: NaiveDate,
    ) -> Result<BillableItem, BillingError> {
        let mut item = self.get_item(id).await?;
        self.ensure_project_writable(item.project_id).await?;

        item.status = ItemStatus::Received;
        item.payment_date = Some(payment_date);
        item.updated_at = chrono::Utc::now();

        validate_billable_item(&item)?;
        self.store.update_item(&item).await?;
        Ok(item)
    }

    /// Fetches an item
    pub async fn get_item(&self, id: BillableItemId) -> Result<BillableItem, BillingError> {
        self.store.get_item(id).await.map_err(|err| {
            if err.is_not_found() {
                BillingError::ItemNotFound(id)
            } else {
                err.into()
            }
        })
    }

    /// Lists all items
    pub async fn list_items(&self) -> Result<Vec<BillableItem>, BillingError> {
        Ok(self.store.list_items().await?)
    }

    /// Lists items owned by a project
    pub async fn items_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<BillableItem>, BillingError> {
        Ok(self.store.items_for_project(project_id).await?)
    }

    /// Removes an item; deleting an item has no cascading side effects
    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: BillableItemId) -> Result<(), BillingError> {
        let item = self.get_item(id).await?;
        self.ensure_project_writable(item.project_id).await?;
        self.store.delete_item(id).await?;
        Ok(())
    }

    // ========================================================================
    // Cascades
    // ========================================================================

    /// Deletes a project with its billable items and purchase orders
    ///
    /// The billing records go first so a failure part-way never leaves a
    /// project pointing at deleted children.
    #[instrument(skip(self))]
    pub async fn delete_project(&self, project_id: ProjectId) -> Result<(), BillingError> {
        self.ensure_project_writable(project_id).await?;

        for item in self.store.items_for_project(project_id).await? {
            self.store.delete_item(item.id).await?;
        }
        for po in self.store.purchase_orders_for_project(project_id).await? {
            self.store.delete_purchase_order(po.id).await?;
        }
        self.directory.delete_project(project_id).await?;
        debug!(project_id = %project_id, "project deleted with billing records");
        Ok(())
    }

    /// Fails unless the project resolves and its client is active
    async fn ensure_project_writable(
        &self,
        project_id: ProjectId,
    ) -> Result<Project, BillingError> {
        let project = self
            .directory
            .get_project(project_id)
            .await
            .map_err(|err| {
                if err.is_not_found() {
                    BillingError::ProjectNotFound(project_id)
                } else {
                    BillingError::Store(err)
                }
            })?;
        let client = self.directory.get_client(project.client_id).await?;
        if !client.is_active {
            return Err(BillingError::InactiveClient(client.id));
        }
        Ok(project)
    }
}
