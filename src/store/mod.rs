//! Remote store seam.
//!
//! The resolver and the contact flow only ever see the [`CatalogStore`] and
//! [`LeadStore`] traits. Concrete adapters live next to them:
//!
//! - [`rest::RestStore`] - PostgREST-style HTTP endpoint (the production store)
//! - [`memory::MemoryStore`] - actor-backed in-memory store for demos and tests
//! - [`mock::MockStore`] - expectation queue for injecting failures in tests
//!
//! # Result contract
//!
//! Each adapter must keep three outcomes apart:
//!
//! | Outcome | Returned as |
//! |---------|-------------|
//! | transport / query failure | `Err(StoreError)` |
//! | zero rows | `Ok(vec![])` / `Ok(None)` |
//! | rows | `Ok(rows)` / `Ok(Some(row))` |

pub mod error;
pub mod memory;
pub mod mock;
pub mod rest;

pub use error::StoreError;
pub use memory::{MemoryStore, MemoryStoreClient};
pub use mock::MockStore;
pub use rest::RestStore;

use crate::model::{CatalogEntry, ContactLead};
use async_trait::async_trait;

/// Read access to the authoritative catalog collection.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Unconditioned select of every entry, in store insertion order.
    async fn list_all(&self) -> Result<Vec<CatalogEntry>, StoreError>;

    /// Exact match on `id`; zero or one row.
    async fn get_by_id(&self, id: &str) -> Result<Option<CatalogEntry>, StoreError>;

    /// Entries flagged featured, at most `limit` of them.
    async fn list_featured(&self, limit: usize) -> Result<Vec<CatalogEntry>, StoreError>;
}

/// Write access to the lead collection.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn insert_lead(&self, lead: &ContactLead) -> Result<(), StoreError>;
}
