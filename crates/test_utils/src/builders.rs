//! Test Data Builders
//!
//! Builder patterns for constructing domain entities with sensible
//! defaults. Tests specify only the fields they care about.

use chrono::NaiveDate;
use core_kernel::{ClientId, DocumentId, Money, ProjectId, PurchaseOrderId};
use domain_billing::{Attribution, BillableItem, InvoiceType, ItemStatus, PurchaseOrder};
use domain_directory::{Client, Project};

use crate::fixtures::{MoneyFixtures, StringFixtures, TemporalFixtures};

/// Builder for test clients
pub struct ClientBuilder {
    legal_name: String,
    gstin: Option<String>,
    email: Option<String>,
    is_active: bool,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            legal_name: StringFixtures::client_name().to_string(),
            gstin: Some(StringFixtures::gstin().to_string()),
            email: Some("billing@acme.example".to_string()),
            is_active: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.legal_name = name.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn build(self) -> Client {
        let mut client = Client::new(self.legal_name);
        client.gstin = self.gstin;
        client.email = self.email;
        client.is_active = self.is_active;
        client
    }
}

/// Builder for test projects
pub struct ProjectBuilder {
    client_id: ClientId,
    name: String,
    spoc_name: Option<String>,
}

impl ProjectBuilder {
    pub fn for_client(client_id: ClientId) -> Self {
        Self {
            client_id,
            name: "Platform Rollout".to_string(),
            spoc_name: Some("Priya Nair".to_string()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn build(self) -> Project {
        let mut project = Project::new(self.client_id, self.name);
        project.spoc_name = self.spoc_name;
        project
    }
}

/// Builder for test purchase orders
pub struct PurchaseOrderBuilder {
    project_id: ProjectId,
    name: String,
    po_number: String,
    po_value: Money,
    end_date: Option<NaiveDate>,
}

impl PurchaseOrderBuilder {
    pub fn for_project(project_id: ProjectId) -> Self {
        Self {
            project_id,
            name: "Annual engagement".to_string(),
            po_number: StringFixtures::po_number().to_string(),
            po_value: MoneyFixtures::po_ceiling(),
            end_date: Some(TemporalFixtures::fy_end()),
        }
    }

    pub fn with_po_number(mut self, po_number: impl Into<String>) -> Self {
        self.po_number = po_number.into();
        self
    }

    pub fn with_value(mut self, value: Money) -> Self {
        self.po_value = value;
        self
    }

    pub fn with_end_date(mut self, end_date: Option<NaiveDate>) -> Self {
        self.end_date = end_date;
        self
    }

    pub fn build(self) -> PurchaseOrder {
        let mut po = PurchaseOrder::new(self.project_id, self.name, self.po_number, self.po_value);
        po.end_date = self.end_date;
        po
    }
}

/// Builder for test billable items
pub struct BillableItemBuilder {
    project_id: ProjectId,
    name: String,
    invoice_type: InvoiceType,
    status: ItemStatus,
    amount: Money,
    start_date: NaiveDate,
    end_date: NaiveDate,
    purchase_order: Option<(PurchaseOrderId, String, Option<NaiveDate>)>,
    invoice_number: Option<String>,
    invoice_date: Option<NaiveDate>,
    payment_date: Option<NaiveDate>,
    invoice_document: Option<DocumentId>,
    attribution: Attribution,
}

impl BillableItemBuilder {
    pub fn for_project(project_id: ProjectId) -> Self {
        Self {
            project_id,
            name: "Annual license".to_string(),
            invoice_type: InvoiceType::License,
            status: ItemStatus::Pending,
            amount: MoneyFixtures::annual_license(),
            start_date: TemporalFixtures::fy_start(),
            end_date: TemporalFixtures::fy_end(),
            purchase_order: None,
            invoice_number: None,
            invoice_date: None,
            payment_date: None,
            invoice_document: None,
            attribution: Attribution::default(),
        }
    }

    pub fn one_time(mut self, amount: Money) -> Self {
        self.invoice_type = InvoiceType::OneTime;
        self.amount = amount;
        self
    }

    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_coverage(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn linked_to(mut self, po: &PurchaseOrder) -> Self {
        self.purchase_order = Some((po.id, po.po_number.clone(), po.end_date));
        self
    }

    /// Marks the item raised with complete invoice metadata
    pub fn raised(mut self, invoice_date: NaiveDate) -> Self {
        self.status = ItemStatus::Raised;
        self.invoice_number = Some(StringFixtures::invoice_number().to_string());
        self.invoice_date = Some(invoice_date);
        self.invoice_document = Some(DocumentId::new());
        self
    }

    /// Marks the item received; implies raised metadata
    pub fn received(mut self, invoice_date: NaiveDate, payment_date: NaiveDate) -> Self {
        self = self.raised(invoice_date);
        self.status = ItemStatus::Received;
        self.payment_date = Some(payment_date);
        self
    }

    pub fn raised_by(mut self, name: impl Into<String>) -> Self {
        self.attribution.invoice_raised_by = Some(name.into());
        self
    }

    pub fn sold_by(mut self, name: impl Into<String>) -> Self {
        self.attribution.sales_manager = Some(name.into());
        self
    }

    pub fn build(self) -> BillableItem {
        let mut item = BillableItem::new(
            self.project_id,
            self.name,
            self.invoice_type,
            self.amount,
            self.start_date,
            self.end_date,
        );
        item.status = self.status;
        if let Some((po_id, po_number, po_end)) = self.purchase_order {
            item.sync_purchase_order(po_id, &po_number, po_end);
        }
        item.invoice_number = self.invoice_number;
        item.invoice_date = self.invoice_date;
        item.payment_date = self.payment_date;
        item.invoice_document = self.invoice_document;
        item.attribution = self.attribution;
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_billing::validate_billable_item;

    #[test]
    fn test_default_item_is_valid_pending() {
        let item = BillableItemBuilder::for_project(ProjectId::new()).build();
        assert_eq!(item.status, ItemStatus::Pending);
        assert!(validate_billable_item(&item).is_ok());
    }

    #[test]
    fn test_raised_builder_passes_invoice_validation() {
        let po = PurchaseOrderBuilder::for_project(ProjectId::new()).build();
        let item = BillableItemBuilder::for_project(po.project_id)
            .linked_to(&po)
            .raised(TemporalFixtures::april_invoice())
            .build();
        assert!(validate_billable_item(&item).is_ok());
    }

    #[test]
    fn test_linked_item_copies_po_fields() {
        let po = PurchaseOrderBuilder::for_project(ProjectId::new()).build();
        let item = BillableItemBuilder::for_project(po.project_id)
            .linked_to(&po)
            .build();
        assert_eq!(item.purchase_order_id, Some(po.id));
        assert_eq!(item.po_number.as_deref(), Some(po.po_number.as_str()));
        assert_eq!(item.po_end_date, po.end_date);
    }
}
