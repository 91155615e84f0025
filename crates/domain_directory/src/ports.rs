//! Directory domain ports
//!
//! The `DirectoryStore` trait defines the CRUD surface the directory
//! domain needs from its backing store; `DocumentStore` covers the opaque
//! document collaborator (binary content crosses as encoded strings, the
//! storage mechanism is external). `infra_store` provides in-memory
//! adapters for both.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ClientId, DocumentId, DomainPort, PortError, ProjectId};

use crate::client::Client;
use crate::project::Project;

/// Request for creating a new client
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct CreateClientRequest {
    /// Registered legal name
    #[validate(length(min = 1, message = "legal name must not be empty"))]
    pub legal_name: String,
    /// GST identification number
    pub gstin: Option<String>,
    /// Billing address
    pub billing_address: Option<String>,
    /// Billing contact email
    #[validate(email)]
    pub email: Option<String>,
}

/// Request for updating a client
///
/// `is_active` is applied before the inactive-client guard so that a
/// deactivated client can be reactivated through the same path.
#[derive(Debug, Clone, Default, Validate, Serialize, Deserialize)]
pub struct UpdateClientRequest {
    pub legal_name: Option<String>,
    pub gstin: Option<String>,
    pub billing_address: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

/// Request for creating a project
#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    /// Owning client
    pub client_id: ClientId,
    /// Project name
    #[validate(length(min = 1, message = "project name must not be empty"))]
    pub name: String,
    /// SPOC name
    pub spoc_name: Option<String>,
    /// SPOC email
    #[validate(email)]
    pub spoc_email: Option<String>,
    /// SPOC phone
    pub spoc_phone: Option<String>,
}

/// Request for updating a project
#[derive(Debug, Clone, Default, Validate, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub spoc_name: Option<String>,
    #[validate(email)]
    pub spoc_email: Option<String>,
    pub spoc_phone: Option<String>,
}

/// A document queued for upload during client onboarding
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    /// Display name (e.g., "GST certificate")
    pub name: String,
    /// Opaque encoded content; the encoding is the collaborator's concern
    pub content: String,
}

/// Port trait for directory persistence
#[async_trait]
pub trait DirectoryStore: DomainPort {
    // Clients

    /// Lists all clients
    async fn list_clients(&self) -> Result<Vec<Client>, PortError>;

    /// Retrieves a client by id, or `PortError::NotFound`
    async fn get_client(&self, id: ClientId) -> Result<Client, PortError>;

    /// Persists a new client
    async fn create_client(&self, client: &Client) -> Result<(), PortError>;

    /// Upserts a client record (last writer wins, no version check)
    async fn update_client(&self, client: &Client) -> Result<(), PortError>;

    /// Removes a client record
    async fn delete_client(&self, id: ClientId) -> Result<(), PortError>;

    // Projects

    /// Lists all projects
    async fn list_projects(&self) -> Result<Vec<Project>, PortError>;

    /// Retrieves a project by id, or `PortError::NotFound`
    async fn get_project(&self, id: ProjectId) -> Result<Project, PortError>;

    /// Lists projects owned by a client
    async fn projects_for_client(&self, client_id: ClientId) -> Result<Vec<Project>, PortError>;

    /// Persists a new project
    async fn create_project(&self, project: &Project) -> Result<(), PortError>;

    /// Upserts a project record (last writer wins, no version check)
    async fn update_project(&self, project: &Project) -> Result<(), PortError>;

    /// Removes a project record
    async fn delete_project(&self, id: ProjectId) -> Result<(), PortError>;
}

/// Port trait for the external document collaborator
///
/// Documents are grouped under an owner key (client/project/item id as a
/// string) so that deleting the owner can cascade to its documents.
#[async_trait]
pub trait DocumentStore: DomainPort {
    /// Stores a document and returns its reference
    async fn put_document(
        &self,
        owner: &str,
        name: &str,
        content: &str,
    ) -> Result<DocumentId, PortError>;

    /// Removes a single document
    async fn delete_document(&self, id: DocumentId) -> Result<(), PortError>;

    /// Lists document references for an owner
    async fn documents_for_owner(&self, owner: &str) -> Result<Vec<DocumentId>, PortError>;

    /// Removes all documents for an owner
    async fn delete_documents_for_owner(&self, owner: &str) -> Result<(), PortError>;
}
