//! Directory domain errors

use thiserror::Error;

use core_kernel::{ClientId, PortError, ProjectId};

/// Errors that can occur in the directory domain
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Client not found
    #[error("Client not found: {0}")]
    ClientNotFound(ClientId),

    /// Project not found
    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Write attempted under an inactive client
    #[error("Client {0} is inactive; writes are blocked")]
    InactiveClient(ClientId),

    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Store failure, propagated unchanged
    #[error(transparent)]
    Store(#[from] PortError),
}

impl From<validator::ValidationErrors> for DirectoryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DirectoryError::Validation(errors.to_string())
    }
}
