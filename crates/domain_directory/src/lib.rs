//! Directory Domain - Clients and Projects
//!
//! This crate owns the client/project hierarchy that the billing domain
//! hangs off. Every project belongs to exactly one client; billable items
//! and purchase orders belong to projects.
//!
//! # Inactive-client guard
//!
//! A client is never hard-deleted from day-to-day workflows; it is
//! deactivated by toggling `is_active`. An inactive client blocks all
//! writes to itself, its projects, and its billable items, while reads
//! remain allowed. The guard runs before any mutation so a rejected write
//! leaves no partial state.
//!
//! # Onboarding saga
//!
//! Client creation plus document uploads is not transactional in the
//! backing store. [`services::DirectoryService::onboard_client`] runs the
//! steps as a saga: if any document upload fails, already-uploaded
//! documents and the client record are removed again.

pub mod client;
pub mod project;
pub mod ports;
pub mod services;
pub mod error;

pub use client::Client;
pub use project::Project;
pub use ports::{
    DirectoryStore, DocumentStore, DocumentUpload,
    CreateClientRequest, UpdateClientRequest,
    CreateProjectRequest, UpdateProjectRequest,
};
pub use services::DirectoryService;
pub use error::DirectoryError;
