//! # In-Memory Store Actor
//!
//! An actor-backed stand-in for the remote store. It owns its entries and
//! leads inside a single Tokio task and answers requests sent over an mpsc
//! channel, so it needs no locks and behaves like an independent service:
//! a caller only sees it through [`MemoryStoreClient`], which implements the
//! same [`CatalogStore`] / [`LeadStore`] traits as the HTTP adapter.
//!
//! ```rust
//! use wrapweft::store::{CatalogStore, MemoryStore};
//! use wrapweft::model::CatalogEntry;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (store, client) = MemoryStore::new(16);
//!     tokio::spawn(store.run());
//!
//!     let entry = CatalogEntry::new("raw-denim", "Raw Denim", "Denim", "d", "ld", "img");
//!     client.insert(entry).await.unwrap();
//!     assert_eq!(client.list_all().await.unwrap().len(), 1);
//! }
//! ```
//!
//! Dropping every client closes the channel and ends [`MemoryStore::run`].

use super::{CatalogStore, LeadStore, StoreError};
use crate::model::{CatalogEntry, ContactLead};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// One-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Requests understood by the store actor.
#[derive(Debug)]
pub enum StoreRequest {
    ListAll {
        respond_to: Response<Vec<CatalogEntry>>,
    },
    Get {
        id: String,
        respond_to: Response<Option<CatalogEntry>>,
    },
    Featured {
        limit: usize,
        respond_to: Response<Vec<CatalogEntry>>,
    },
    Insert {
        entry: CatalogEntry,
        respond_to: Response<()>,
    },
    InsertLead {
        lead: ContactLead,
        respond_to: Response<()>,
    },
    Leads {
        respond_to: Response<Vec<ContactLead>>,
    },
}

/// The server half: owns the rows and the receiver.
pub struct MemoryStore {
    receiver: mpsc::Receiver<StoreRequest>,
    entries: Vec<CatalogEntry>,
    leads: Vec<ContactLead>,
}

impl MemoryStore {
    /// Creates an empty store and its client.
    ///
    /// `buffer_size` is the channel capacity; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, MemoryStoreClient) {
        Self::with_entries(buffer_size, Vec::new())
    }

    /// Creates a store seeded with `entries`, kept in the given order.
    ///
    /// Later duplicates of an id are dropped.
    pub fn with_entries(buffer_size: usize, entries: Vec<CatalogEntry>) -> (Self, MemoryStoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let mut unique: Vec<CatalogEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if unique.iter().any(|e| e.id == entry.id) {
                warn!(id = %entry.id, "Duplicate id dropped from seed");
                continue;
            }
            unique.push(entry);
        }
        let store = Self {
            receiver,
            entries: unique,
            leads: Vec::new(),
        };
        (store, MemoryStoreClient { sender })
    }

    /// Processes requests until every client has been dropped.
    pub async fn run(mut self) {
        info!(size = self.entries.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::ListAll { respond_to } => {
                    debug!(size = self.entries.len(), "ListAll");
                    let _ = respond_to.send(Ok(self.entries.clone()));
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.entries.iter().find(|e| e.id == id).cloned();
                    debug!(%id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Featured { limit, respond_to } => {
                    let featured: Vec<_> = self
                        .entries
                        .iter()
                        .filter(|e| e.is_featured())
                        .take(limit)
                        .cloned()
                        .collect();
                    debug!(limit, found = featured.len(), "Featured");
                    let _ = respond_to.send(Ok(featured));
                }
                StoreRequest::Insert { entry, respond_to } => {
                    if self.entries.iter().any(|e| e.id == entry.id) {
                        warn!(id = %entry.id, "Duplicate id");
                        let _ = respond_to.send(Err(StoreError::Query {
                            status: 409,
                            message: format!("duplicate key value: {}", entry.id),
                        }));
                        continue;
                    }
                    info!(id = %entry.id, size = self.entries.len() + 1, "Inserted");
                    self.entries.push(entry);
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::InsertLead { lead, respond_to } => {
                    self.leads.push(lead);
                    info!(leads = self.leads.len(), "Lead stored");
                    let _ = respond_to.send(Ok(()));
                }
                StoreRequest::Leads { respond_to } => {
                    let _ = respond_to.send(Ok(self.leads.clone()));
                }
            }
        }

        info!(size = self.entries.len(), leads = self.leads.len(), "Shutdown");
    }
}

/// The client half: cheap to clone, holds only the sender.
#[derive(Clone)]
pub struct MemoryStoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl MemoryStoreClient {
    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> StoreRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    /// Appends an entry; fails with a 409 query error on a duplicate id.
    pub async fn insert(&self, entry: CatalogEntry) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Insert { entry, respond_to })
            .await
    }

    /// Leads stored so far, oldest first.
    pub async fn leads(&self) -> Result<Vec<ContactLead>, StoreError> {
        self.request(|respond_to| StoreRequest::Leads { respond_to })
            .await
    }
}

#[async_trait]
impl CatalogStore for MemoryStoreClient {
    async fn list_all(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        self.request(|respond_to| StoreRequest::ListAll { respond_to })
            .await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<CatalogEntry>, StoreError> {
        let id = id.to_string();
        self.request(|respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    async fn list_featured(&self, limit: usize) -> Result<Vec<CatalogEntry>, StoreError> {
        self.request(|respond_to| StoreRequest::Featured { limit, respond_to })
            .await
    }
}

#[async_trait]
impl LeadStore for MemoryStoreClient {
    async fn insert_lead(&self, lead: &ContactLead) -> Result<(), StoreError> {
        let lead = lead.clone();
        self.request(|respond_to| StoreRequest::InsertLead { lead, respond_to })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, featured: bool) -> CatalogEntry {
        CatalogEntry::new(id, id, "Denim", "d", "ld", "img").featured(featured)
    }

    #[tokio::test]
    async fn test_keeps_insertion_order() {
        let (store, client) = MemoryStore::new(8);
        let handle = tokio::spawn(store.run());

        for id in ["c", "a", "b"] {
            client.insert(entry(id, false)).await.unwrap();
        }
        let ids: Vec<_> = client
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_a_query_error() {
        let (store, client) = MemoryStore::new(8);
        tokio::spawn(store.run());

        client.insert(entry("a", false)).await.unwrap();
        let err = client.insert(entry("a", false)).await.unwrap_err();
        assert!(err.is_query());
    }

    #[tokio::test]
    async fn test_featured_respects_flag_and_limit() {
        let seed = vec![
            entry("a", true),
            entry("b", false),
            entry("c", true),
            entry("d", true),
        ];
        let (store, client) = MemoryStore::with_entries(8, seed);
        tokio::spawn(store.run());

        let featured = client.list_featured(2).await.unwrap();
        let ids: Vec<_> = featured.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let (store, client) = MemoryStore::with_entries(8, vec![entry("a", false)]);
        tokio::spawn(store.run());

        assert!(client.get_by_id("a").await.unwrap().is_some());
        assert!(client.get_by_id("zzz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_closed_actor_reports_transport_error() {
        let (store, client) = MemoryStore::new(8);
        drop(store);

        let err = client.list_all().await.unwrap_err();
        assert_eq!(err, StoreError::ActorClosed);
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_leads_are_recorded() {
        let (store, client) = MemoryStore::new(8);
        tokio::spawn(store.run());

        let lead = ContactLead::new("Jane", "Doe", "jane@example.com", "Hello", "Hi there");
        client.insert_lead(&lead).await.unwrap();
        assert_eq!(client.leads().await.unwrap(), vec![lead]);
    }
}
