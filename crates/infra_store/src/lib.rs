//! Store Infrastructure - In-Memory Adapters
//!
//! Concrete implementations of the domain port traits backed by
//! `tokio::sync::RwLock`-guarded maps. Records are keyed by id; writes
//! are last-writer-wins upserts with no version check, matching the port
//! contracts. Used as the runtime store and as the test double for every
//! service-level test.

pub mod memory;

pub use memory::{InMemoryBillingStore, InMemoryDirectoryStore, InMemoryDocumentStore};
