use crate::catalog::CatalogResolver;
use crate::config::SiteConfig;
use crate::contact::LeadSubmitter;
use crate::deck::{DeckService, FileSink, PptxEngine};
use crate::model::CatalogEntry;
use crate::store::{CatalogStore, LeadStore, MemoryStore, MemoryStoreClient, RestStore, StoreError};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Request buffer of the in-memory store actor.
const MEMORY_STORE_BUFFER: usize = 32;

/// Everything the site needs, wired from one [`SiteConfig`].
///
/// - **`catalog`**: remote-first catalog with the offline fallback
/// - **`contact`**: lead submission under the configured failure policy
/// - **`deck`**: presentation export
///
/// Stores are shared between the three services. When the in-memory store is
/// used its actor task is owned here and joined by [`shutdown`](Self::shutdown).
pub struct Storefront {
    pub catalog: CatalogResolver,
    pub contact: LeadSubmitter,
    pub deck: DeckService,
    memory: Option<MemoryStoreClient>,
    handles: Vec<JoinHandle<()>>,
}

impl Storefront {
    /// Talks to the configured remote store, or runs fully offline when the
    /// remote is not configured.
    pub fn from_config(config: &SiteConfig) -> Result<Self, StoreError> {
        match config.remote() {
            Some(remote) => {
                info!(url = %remote.url, "Using remote store");
                let store = Arc::new(RestStore::new(remote)?);
                Ok(Self::with_stores(config, Some(store.clone()), Some(store)))
            }
            None => {
                info!("Remote store not configured, running offline");
                Ok(Self::with_stores(config, None, None))
            }
        }
    }

    pub fn with_stores(
        config: &SiteConfig,
        catalog_store: Option<Arc<dyn CatalogStore>>,
        lead_store: Option<Arc<dyn LeadStore>>,
    ) -> Self {
        let catalog = CatalogResolver::new(catalog_store);
        let contact = LeadSubmitter::new(lead_store, &config.contact);
        let deck = DeckService::new(
            catalog.clone(),
            Arc::new(PptxEngine::new()),
            Arc::new(FileSink::new(config.deck.output_dir.clone())),
            &config.deck,
        );
        Self {
            catalog,
            contact,
            deck,
            memory: None,
            handles: Vec::new(),
        }
    }

    /// Backs every service with an in-memory store actor seeded with `seed`.
    pub fn in_memory(config: &SiteConfig, seed: Vec<CatalogEntry>) -> Self {
        let (store, client) = MemoryStore::with_entries(MEMORY_STORE_BUFFER, seed);
        let handle = tokio::spawn(store.run());

        let shared = Arc::new(client.clone());
        let mut storefront = Self::with_stores(config, Some(shared.clone()), Some(shared));
        storefront.memory = Some(client);
        storefront.handles.push(handle);
        storefront
    }

    /// Handle to the in-memory store, if one is running.
    ///
    /// Clones must be dropped before [`shutdown`](Self::shutdown) can finish.
    pub fn memory_store(&self) -> Option<&MemoryStoreClient> {
        self.memory.as_ref()
    }

    /// Drops every store handle and waits for background tasks to finish.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");

        let Self {
            catalog,
            contact,
            deck,
            memory,
            handles,
        } = self;
        drop(deck);
        drop(contact);
        drop(catalog);
        drop(memory);

        for handle in handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}
