//! Project aggregate
//!
//! A project is the unit billable items and purchase orders attach to.
//! Each project is owned by exactly one client and carries the single
//! point of contact (SPOC) for billing queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClientId, ProjectId};

/// A client project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,
    /// Owning client (must resolve to an existing client)
    pub client_id: ClientId,
    /// Project name
    pub name: String,
    /// SPOC name
    pub spoc_name: Option<String>,
    /// SPOC email
    pub spoc_email: Option<String>,
    /// SPOC phone
    pub spoc_phone: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project under the given client
    pub fn new(client_id: ClientId, name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(),
            client_id,
            name: name.into(),
            spoc_name: None,
            spoc_email: None,
            spoc_phone: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the SPOC contact details
    pub fn with_spoc(
        mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        self.spoc_name = Some(name.into());
        self.spoc_email = Some(email.into());
        self.spoc_phone = Some(phone.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_belongs_to_client() {
        let client_id = ClientId::new();
        let project = Project::new(client_id, "ERP Rollout");
        assert_eq!(project.client_id, client_id);
        assert_eq!(project.name, "ERP Rollout");
    }

    #[test]
    fn test_project_spoc() {
        let project = Project::new(ClientId::new(), "ERP Rollout")
            .with_spoc("Priya N", "priya@acme.example", "+91 98000 00000");
        assert_eq!(project.spoc_name.as_deref(), Some("Priya N"));
        assert_eq!(project.spoc_email.as_deref(), Some("priya@acme.example"));
    }
}
