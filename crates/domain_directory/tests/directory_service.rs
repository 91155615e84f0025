//! Directory service tests over the in-memory store

use std::sync::Arc;

use domain_directory::{
    CreateClientRequest, CreateProjectRequest, DirectoryError, DirectoryService,
    UpdateClientRequest, UpdateProjectRequest,
};
use infra_store::{InMemoryDirectoryStore, InMemoryDocumentStore};

fn service() -> DirectoryService {
    DirectoryService::new(
        Arc::new(InMemoryDirectoryStore::new()),
        Arc::new(InMemoryDocumentStore::new()),
    )
}

fn client_request(name: &str) -> CreateClientRequest {
    CreateClientRequest {
        legal_name: name.to_string(),
        gstin: Some("27AAPFU0939F1ZV".to_string()),
        billing_address: None,
        email: Some("billing@acme.example".to_string()),
    }
}

#[tokio::test]
async fn test_create_and_fetch_client() {
    let service = service();
    let created = service.create_client(client_request("Acme")).await.unwrap();
    assert!(created.is_active);

    let fetched = service.get_client(created.id).await.unwrap();
    assert_eq!(fetched.legal_name, "Acme");
    assert_eq!(fetched.gstin.as_deref(), Some("27AAPFU0939F1ZV"));
}

#[tokio::test]
async fn test_create_client_rejects_empty_name() {
    let service = service();
    let err = service.create_client(client_request("")).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Validation(_)));
}

#[tokio::test]
async fn test_create_client_rejects_malformed_email() {
    let service = service();
    let mut request = client_request("Acme");
    request.email = Some("not-an-email".to_string());
    let err = service.create_client(request).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Validation(_)));
}

#[tokio::test]
async fn test_field_edits_blocked_while_inactive() {
    let service = service();
    let client = service.create_client(client_request("Acme")).await.unwrap();
    service.deactivate_client(client.id).await.unwrap();

    let err = service
        .update_client(
            client.id,
            UpdateClientRequest {
                legal_name: Some("Acme Corporation".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::InactiveClient(_)));
}

#[tokio::test]
async fn test_reactivation_goes_through_update() {
    let service = service();
    let client = service.create_client(client_request("Acme")).await.unwrap();
    service.deactivate_client(client.id).await.unwrap();

    // Reactivation plus a field edit in the same request must succeed:
    // the flag applies before the guard runs
    let updated = service
        .update_client(
            client.id,
            UpdateClientRequest {
                legal_name: Some("Acme Corporation".to_string()),
                is_active: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.is_active);
    assert_eq!(updated.legal_name, "Acme Corporation");
}

#[tokio::test]
async fn test_projects_scoped_to_client() {
    let service = service();
    let acme = service.create_client(client_request("Acme")).await.unwrap();
    let globex = service.create_client(client_request("Globex")).await.unwrap();

    for (client, name) in [(&acme, "Platform"), (&acme, "Rollout"), (&globex, "Pilot")] {
        service
            .create_project(CreateProjectRequest {
                client_id: client.id,
                name: name.to_string(),
                spoc_name: None,
                spoc_email: None,
                spoc_phone: None,
            })
            .await
            .unwrap();
    }

    assert_eq!(service.projects_for_client(acme.id).await.unwrap().len(), 2);
    assert_eq!(service.projects_for_client(globex.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_project_for_unknown_client_fails() {
    let service = service();
    let err = service
        .create_project(CreateProjectRequest {
            client_id: core_kernel::ClientId::new(),
            name: "Orphan".to_string(),
            spoc_name: None,
            spoc_email: None,
            spoc_phone: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::ClientNotFound(_)));
}

#[tokio::test]
async fn test_update_project_respects_inactive_guard() {
    let service = service();
    let client = service.create_client(client_request("Acme")).await.unwrap();
    let project = service
        .create_project(CreateProjectRequest {
            client_id: client.id,
            name: "Platform".to_string(),
            spoc_name: None,
            spoc_email: None,
            spoc_phone: None,
        })
        .await
        .unwrap();

    service.deactivate_client(client.id).await.unwrap();
    let err = service
        .update_project(
            project.id,
            UpdateProjectRequest {
                name: Some("Platform v2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DirectoryError::InactiveClient(_)));
}
