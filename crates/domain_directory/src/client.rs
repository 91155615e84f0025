//! Client aggregate
//!
//! A client is the billing counterparty: the legal entity invoices are
//! raised against. Clients carry optional Indian tax fields (GSTIN) and an
//! `is_active` flag that gates all writes beneath them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::ClientId;

/// A billing client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier (time-ordered)
    pub id: ClientId,
    /// Registered legal name
    pub legal_name: String,
    /// GST identification number, if registered in India
    pub gstin: Option<String>,
    /// Billing address as it should appear on invoices
    pub billing_address: Option<String>,
    /// Billing contact email
    pub email: Option<String>,
    /// Whether the client accepts new writes
    pub is_active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Creates a new active client
    pub fn new(legal_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ClientId::new(),
            legal_name: legal_name.into(),
            gstin: None,
            billing_address: None,
            email: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the GSTIN
    pub fn with_gstin(mut self, gstin: impl Into<String>) -> Self {
        self.gstin = Some(gstin.into());
        self
    }

    /// Sets the billing address
    pub fn with_billing_address(mut self, address: impl Into<String>) -> Self {
        self.billing_address = Some(address.into());
        self
    }

    /// Sets the billing contact email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Deactivates the client, blocking further writes under it
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Reactivates the client
    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }
}
