//! Wired-up services over in-memory stores
//!
//! Every service shares one set of in-memory adapters so a test can
//! drive the directory, billing, and analytics surfaces against the same
//! state.

use std::sync::Arc;

use chrono::NaiveDate;

use domain_analytics::{AnalyticsEngine, EngineConfig, MetricsSnapshot};
use domain_billing::BillingService;
use domain_directory::{Client, DirectoryService, Project};
use infra_store::{InMemoryBillingStore, InMemoryDirectoryStore, InMemoryDocumentStore};

/// Shared stores plus the services wired over them
pub struct TestPortfolio {
    pub directory_store: Arc<InMemoryDirectoryStore>,
    pub billing_store: Arc<InMemoryBillingStore>,
    pub document_store: Arc<InMemoryDocumentStore>,
    pub directory: DirectoryService,
    pub billing: BillingService,
}

impl Default for TestPortfolio {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPortfolio {
    /// Empty stores, services wired
    pub fn new() -> Self {
        Self::with_document_store(InMemoryDocumentStore::shared())
    }

    /// Empty stores with a caller-supplied document collaborator
    ///
    /// Lets saga tests substitute a failing document store.
    pub fn with_document_store(document_store: Arc<InMemoryDocumentStore>) -> Self {
        crate::init_test_tracing();
        let directory_store = InMemoryDirectoryStore::shared();
        let billing_store = InMemoryBillingStore::shared();
        let directory =
            DirectoryService::new(directory_store.clone(), document_store.clone());
        let billing = BillingService::new(billing_store.clone(), directory_store.clone());
        Self {
            directory_store,
            billing_store,
            document_store,
            directory,
            billing,
        }
    }

    /// Seeds a client with one project directly into the stores
    pub async fn seed_client_with_project(&self, client: Client, project: Project) {
        use domain_directory::DirectoryStore as _;
        self.directory_store
            .create_client(&client)
            .await
            .expect("seed client");
        self.directory_store
            .create_project(&project)
            .await
            .expect("seed project");
    }

    /// Snapshot of the current store contents for the metrics engine
    pub async fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot::load(&*self.directory_store, &*self.billing_store)
            .await
            .expect("in-memory snapshot never fails")
    }

    /// Metrics engine over the current store contents
    pub async fn engine(&self, as_of: NaiveDate) -> AnalyticsEngine {
        AnalyticsEngine::new(self.snapshot().await, EngineConfig::default(), as_of)
    }
}
