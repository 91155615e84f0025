//! Directory domain services
//!
//! `DirectoryService` orchestrates client/project writes: request
//! validation, the inactive-client guard, the onboarding saga, and
//! document cascade on client deletion. All checks run before the first
//! mutation so a rejected write leaves no partial state.

use std::sync::Arc;

use tracing::{debug, instrument, warn};
use validator::Validate;

use core_kernel::{ClientId, ProjectId};

use crate::client::Client;
use crate::error::DirectoryError;
use crate::ports::{
    CreateClientRequest, CreateProjectRequest, DirectoryStore, DocumentStore, DocumentUpload,
    UpdateClientRequest, UpdateProjectRequest,
};
use crate::project::Project;

/// Application service for the directory domain
pub struct DirectoryService {
    store: Arc<dyn DirectoryStore>,
    documents: Arc<dyn DocumentStore>,
}

impl DirectoryService {
    /// Creates a new directory service over the given adapters
    pub fn new(store: Arc<dyn DirectoryStore>, documents: Arc<dyn DocumentStore>) -> Self {
        Self { store, documents }
    }

    // ========================================================================
    // Clients
    // ========================================================================

    /// Creates a client record
    #[instrument(skip(self, request), fields(legal_name = %request.legal_name))]
    pub async fn create_client(&self, request: CreateClientRequest) -> Result<Client, DirectoryError> {
        request.validate()?;

        let mut client = Client::new(request.legal_name);
        client.gstin = request.gstin;
        client.billing_address = request.billing_address;
        client.email = request.email;

        self.store.create_client(&client).await?;
        debug!(client_id = %client.id, "client created");
        Ok(client)
    }

    /// Creates a client together with its onboarding documents
    ///
    /// The store offers no multi-record transaction, so this runs as a
    /// saga: client record first, then each document. On any upload
    /// failure the already-uploaded documents and the client record are
    /// removed again before the error is returned.
    #[instrument(skip(self, request, documents), fields(legal_name = %request.legal_name))]
    pub async fn onboard_client(
        &self,
        request: CreateClientRequest,
        documents: Vec<DocumentUpload>,
    ) -> Result<Client, DirectoryError> {
        let client = self.create_client(request).await?;
        let owner = client.id.to_string();

        for doc in &documents {
            if let Err(err) = self
                .documents
                .put_document(&owner, &doc.name, &doc.content)
                .await
            {
                warn!(client_id = %client.id, document = %doc.name, %err,
                    "onboarding upload failed; compensating");
                // Compensation: best-effort document cleanup, then the record
                if let Err(cleanup) = self.documents.delete_documents_for_owner(&owner).await {
                    warn!(client_id = %client.id, %cleanup, "document cleanup failed");
                }
                self.store.delete_client(client.id).await?;
                return Err(err.into());
            }
        }

        Ok(client)
    }

    /// Fetches a client
    pub async fn get_client(&self, id: ClientId) -> Result<Client, DirectoryError> {
        self.store.get_client(id).await.map_err(|err| {
            if err.is_not_found() {
                DirectoryError::ClientNotFound(id)
            } else {
                err.into()
            }
        })
    }

    /// Lists all clients (reads are never blocked by the inactive flag)
    pub async fn list_clients(&self) -> Result<Vec<Client>, DirectoryError> {
        Ok(self.store.list_clients().await?)
    }

    /// Updates a client
    ///
    /// Reactivation (`is_active: Some(true)`) is applied before the guard;
    /// every other field edit on an inactive client is rejected.
    #[instrument(skip(self, request))]
    pub async fn update_client(
        &self,
        id: ClientId,
        request: UpdateClientRequest,
    ) -> Result<Client, DirectoryError> {
        request.validate()?;
        let mut client = self.get_client(id).await?;

        match request.is_active {
            Some(true) if !client.is_active => client.activate(),
            Some(false) if client.is_active => client.deactivate(),
            _ => {}
        }

        let has_field_edits = request.legal_name.is_some()
            || request.gstin.is_some()
            || request.billing_address.is_some()
            || request.email.is_some();
        if has_field_edits && !client.is_active {
            return Err(DirectoryError::InactiveClient(id));
        }

        if let Some(legal_name) = request.legal_name {
            client.legal_name = legal_name;
        }
        if let Some(gstin) = request.gstin {
            client.gstin = Some(gstin);
        }
        if let Some(address) = request.billing_address {
            client.billing_address = Some(address);
        }
        if let Some(email) = request.email {
            client.email = Some(email);
        }
        client.updated_at = chrono::Utc::now();

        self.store.update_client(&client).await?;
        Ok(client)
    }

    /// Deactivates a client, blocking writes beneath it
    #[instrument(skip(self))]
    pub async fn deactivate_client(&self, id: ClientId) -> Result<Client, DirectoryError> {
        let mut client = self.get_client(id).await?;
        client.deactivate();
        self.store.update_client(&client).await?;
        debug!(client_id = %id, "client deactivated");
        Ok(client)
    }

    /// Deletes a client record and cascades to its documents
    ///
    /// Day-to-day workflows deactivate instead; deletion exists for
    /// administrative cleanup and removes the client's documents first.
    #[instrument(skip(self))]
    pub async fn delete_client(&self, id: ClientId) -> Result<(), DirectoryError> {
        let client = self.get_client(id).await?;
        self.documents
            .delete_documents_for_owner(&client.id.to_string())
            .await?;
        self.store.delete_client(id).await?;
        Ok(())
    }

    // ========================================================================
    // Projects
    // ========================================================================

    /// Creates a project under an existing, active client
    #[instrument(skip(self, request), fields(client_id = %request.client_id))]
    pub async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> Result<Project, DirectoryError> {
        request.validate()?;
        let client = self.get_client(request.client_id).await?;
        if !client.is_active {
            return Err(DirectoryError::InactiveClient(client.id));
        }

        let mut project = Project::new(request.client_id, request.name);
        project.spoc_name = request.spoc_name;
        project.spoc_email = request.spoc_email;
        project.spoc_phone = request.spoc_phone;

        self.store.create_project(&project).await?;
        debug!(project_id = %project.id, "project created");
        Ok(project)
    }

    /// Fetches a project
    pub async fn get_project(&self, id: ProjectId) -> Result<Project, DirectoryError> {
        self.store.get_project(id).await.map_err(|err| {
            if err.is_not_found() {
                DirectoryError::ProjectNotFound(id)
            } else {
                err.into()
            }
        })
    }

    /// Lists all projects
    pub async fn list_projects(&self) -> Result<Vec<Project>, DirectoryError> {
        Ok(self.store.list_projects().await?)
    }

    /// Lists projects owned by a client
    pub async fn projects_for_client(
        &self,
        client_id: ClientId,
    ) -> Result<Vec<Project>, DirectoryError> {
        Ok(self.store.projects_for_client(client_id).await?)
    }

    /// Updates a project, subject to the inactive-client guard
    #[instrument(skip(self, request))]
    pub async fn update_project(
        &self,
        id: ProjectId,
        request: UpdateProjectRequest,
    ) -> Result<Project, DirectoryError> {
        request.validate()?;
        let mut project = self.get_project(id).await?;
        self.ensure_client_active(project.client_id).await?;

        if let Some(name) = request.name {
            project.name = name;
        }
        if let Some(spoc_name) = request.spoc_name {
            project.spoc_name = Some(spoc_name);
        }
        if let Some(spoc_email) = request.spoc_email {
            project.spoc_email = Some(spoc_email);
        }
        if let Some(spoc_phone) = request.spoc_phone {
            project.spoc_phone = Some(spoc_phone);
        }

        self.store.update_project(&project).await?;
        Ok(project)
    }

    /// Removes a project record
    ///
    /// Cascading to the project's billable items and purchase orders is
    /// orchestrated by the billing service, which owns those records and
    /// calls this after clearing them.
    #[instrument(skip(self))]
    pub async fn delete_project(&self, id: ProjectId) -> Result<(), DirectoryError> {
        let project = self.get_project(id).await?;
        self.ensure_client_active(project.client_id).await?;
        self.store.delete_project(id).await?;
        Ok(())
    }

    /// Fails with `InactiveClient` unless the client exists and is active
    pub async fn ensure_client_active(&self, id: ClientId) -> Result<Client, DirectoryError> {
        let client = self.get_client(id).await?;
        if !client.is_active {
            return Err(DirectoryError::InactiveClient(id));
        }
        Ok(client)
    }
}
