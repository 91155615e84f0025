//! In-memory adapters for the directory, billing, and document ports

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{
    BillableItemId, ClientId, DocumentId, DomainPort, PortError, ProjectId, PurchaseOrderId,
};
use domain_billing::{BillableItem, BillingStore, PurchaseOrder};
use domain_directory::{Client, DirectoryStore, DocumentStore, Project};

/// In-memory directory store
///
/// Listings return records in insertion order so rankings that break ties
/// by encounter order stay deterministic.
#[derive(Default)]
pub struct InMemoryDirectoryStore {
    clients: RwLock<Vec<Client>>,
    projects: RwLock<Vec<Project>>,
}

impl InMemoryDirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl DomainPort for InMemoryDirectoryStore {}

#[async_trait]
impl DirectoryStore for InMemoryDirectoryStore {
    async fn list_clients(&self) -> Result<Vec<Client>, PortError> {
        Ok(self.clients.read().await.clone())
    }

    async fn get_client(&self, id: ClientId) -> Result<Client, PortError> {
        self.clients
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("client", id))
    }

    async fn create_client(&self, client: &Client) -> Result<(), PortError> {
        let mut clients = self.clients.write().await;
        if clients.iter().any(|c| c.id == client.id) {
            return Err(PortError::conflict(format!(
                "client {} already exists",
                client.id
            )));
        }
        clients.push(client.clone());
        Ok(())
    }

    async fn update_client(&self, client: &Client) -> Result<(), PortError> {
        let mut clients = self.clients.write().await;
        match clients.iter_mut().find(|c| c.id == client.id) {
            Some(existing) => *existing = client.clone(),
            None => {
                tracing::debug!(client_id = %client.id, "update inserted a new client row");
                clients.push(client.clone());
            }
        }
        Ok(())
    }

    async fn delete_client(&self, id: ClientId) -> Result<(), PortError> {
        let mut clients = self.clients.write().await;
        let before = clients.len();
        clients.retain(|c| c.id != id);
        if clients.len() == before {
            return Err(PortError::not_found("client", id));
        }
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<Project>, PortError> {
        Ok(self.projects.read().await.clone())
    }

    async fn get_project(&self, id: ProjectId) -> Result<Project, PortError> {
        self.projects
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("project", id))
    }

    async fn projects_for_client(&self, client_id: ClientId) -> Result<Vec<Project>, PortError> {
        Ok(self
            .projects
            .read()
            .await
            .iter()
            .filter(|p| p.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn create_project(&self, project: &Project) -> Result<(), PortError> {
        let mut projects = self.projects.write().await;
        if projects.iter().any(|p| p.id == project.id) {
            return Err(PortError::conflict(format!(
                "project {} already exists",
                project.id
            )));
        }
        projects.push(project.clone());
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> Result<(), PortError> {
        let mut projects = self.projects.write().await;
        match projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project.clone(),
            None => {
                tracing::debug!(project_id = %project.id, "update inserted a new project row");
                projects.push(project.clone());
            }
        }
        Ok(())
    }

    async fn delete_project(&self, id: ProjectId) -> Result<(), PortError> {
        let mut projects = self.projects.write().await;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        if projects.len() == before {
            return Err(PortError::not_found("project", id));
        }
        Ok(())
    }
}

/// In-memory billing store
#[derive(Default)]
pub struct InMemoryBillingStore {
    items: RwLock<Vec<BillableItem>>,
    purchase_orders: RwLock<Vec<PurchaseOrder>>,
}

impl InMemoryBillingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl DomainPort for InMemoryBillingStore {}

#[async_trait]
impl BillingStore for InMemoryBillingStore {
    async fn list_items(&self) -> Result<Vec<BillableItem>, PortError> {
        Ok(self.items.read().await.clone())
    }

    async fn get_item(&self, id: BillableItemId) -> Result<BillableItem, PortError> {
        self.items
            .read()
            .await
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("billable item", id))
    }

    async fn items_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<BillableItem>, PortError> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .filter(|i| i.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn items_for_po_number(
        &self,
        po_number: &str,
    ) -> Result<Vec<BillableItem>, PortError> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .filter(|i| i.po_number.as_deref() == Some(po_number))
            .cloned()
            .collect())
    }

    async fn create_item(&self, item: &BillableItem) -> Result<(), PortError> {
        let mut items = self.items.write().await;
        if items.iter().any(|i| i.id == item.id) {
            return Err(PortError::conflict(format!(
                "billable item {} already exists",
                item.id
            )));
        }
        items.push(item.clone());
        Ok(())
    }

    async fn update_item(&self, item: &BillableItem) -> Result<(), PortError> {
        let mut items = self.items.write().await;
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => *existing = item.clone(),
            None => {
                tracing::debug!(item_id = %item.id, "update inserted a new item row");
                items.push(item.clone());
            }
        }
        Ok(())
    }

    async fn delete_item(&self, id: BillableItemId) -> Result<(), PortError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(PortError::not_found("billable item", id));
        }
        Ok(())
    }

    async fn list_purchase_orders(&self) -> Result<Vec<PurchaseOrder>, PortError> {
        Ok(self.purchase_orders.read().await.clone())
    }

    async fn get_purchase_order(
        &self,
        id: PurchaseOrderId,
    ) -> Result<PurchaseOrder, PortError> {
        self.purchase_orders
            .read()
            .await
            .iter()
            .find(|po| po.id == id)
            .cloned()
            .ok_or_else(|| PortError::not_found("purchase order", id))
    }

    async fn purchase_orders_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<PurchaseOrder>, PortError> {
        Ok(self
            .purchase_orders
            .read()
            .await
            .iter()
            .filter(|po| po.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn create_purchase_order(&self, po: &PurchaseOrder) -> Result<(), PortError> {
        let mut orders = self.purchase_orders.write().await;
        if orders.iter().any(|existing| existing.id == po.id) {
            return Err(PortError::conflict(format!(
                "purchase order {} already exists",
                po.id
            )));
        }
        orders.push(po.clone());
        Ok(())
    }

    async fn update_purchase_order(&self, po: &PurchaseOrder) -> Result<(), PortError> {
        let mut orders = self.purchase_orders.write().await;
        match orders.iter_mut().find(|existing| existing.id == po.id) {
            Some(existing) => *existing = po.clone(),
            None => {
                tracing::debug!(po_id = %po.id, "update inserted a new purchase order row");
                orders.push(po.clone());
            }
        }
        Ok(())
    }

    async fn delete_purchase_order(&self, id: PurchaseOrderId) -> Result<(), PortError> {
        let mut orders = self.purchase_orders.write().await;
        let before = orders.len();
        orders.retain(|po| po.id != id);
        if orders.len() == before {
            return Err(PortError::not_found("purchase order", id));
        }
        Ok(())
    }
}

struct StoredDocument {
    owner: String,
    name: String,
    content: String,
}

/// In-memory document collaborator
///
/// Stands in for the external document service. `fail_after` makes the
/// store reject uploads past a threshold so saga compensation paths can
/// be exercised.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<DocumentId, StoredDocument>>,
    fail_after: Option<usize>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// A store that accepts `limit` uploads and then fails every further
    /// `put_document` with a connection error
    pub fn failing_after(limit: usize) -> Arc<Self> {
        Arc::new(Self {
            documents: RwLock::new(HashMap::new()),
            fail_after: Some(limit),
        })
    }

    /// Number of stored documents, across all owners
    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Retrieves stored content for assertions
    pub async fn content_of(&self, id: DocumentId) -> Option<String> {
        self.documents
            .read()
            .await
            .get(&id)
            .map(|doc| doc.content.clone())
    }
}

impl DomainPort for InMemoryDocumentStore {}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn put_document(
        &self,
        owner: &str,
        name: &str,
        content: &str,
    ) -> Result<DocumentId, PortError> {
        let mut documents = self.documents.write().await;
        if let Some(limit) = self.fail_after {
            if documents.len() >= limit {
                return Err(PortError::connection("document service unavailable"));
            }
        }
        let id = DocumentId::new();
        documents.insert(
            id,
            StoredDocument {
                owner: owner.to_string(),
                name: name.to_string(),
                content: content.to_string(),
            },
        );
        Ok(id)
    }

    async fn delete_document(&self, id: DocumentId) -> Result<(), PortError> {
        self.documents
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found("document", id))
    }

    async fn documents_for_owner(&self, owner: &str) -> Result<Vec<DocumentId>, PortError> {
        Ok(self
            .documents
            .read()
            .await
            .iter()
            .filter(|(_, doc)| doc.owner == owner)
            .map(|(id, _)| *id)
            .collect())
    }

    async fn delete_documents_for_owner(&self, owner: &str) -> Result<(), PortError> {
        self.documents
            .write()
            .await
            .retain(|_, doc| doc.owner != owner);
        Ok(())
    }
}
