use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wrapweft::catalog::{fallback, CatalogResolver, Lookup, Source};
use wrapweft::model::CatalogEntry;
use wrapweft::store::{CatalogStore, MemoryStore, MockStore, StoreError};

/// A remote store that is configured but never answers successfully.
#[derive(Default)]
struct DownStore {
    calls: AtomicUsize,
}

#[async_trait]
impl CatalogStore for DownStore {
    async fn list_all(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Transport("connection refused".into()))
    }

    async fn get_by_id(&self, _id: &str) -> Result<Option<CatalogEntry>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Transport("connection refused".into()))
    }

    async fn list_featured(&self, _limit: usize) -> Result<Vec<CatalogEntry>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Transport("operation timed out".into()))
    }
}

fn featured(id: &str, title: &str) -> CatalogEntry {
    CatalogEntry::new(id, title, "Denim", "remote description", "remote long", "remote.jpg").featured(true)
}

#[tokio::test]
async fn test_every_offline_entry_is_found_without_remote() {
    let resolver = CatalogResolver::offline();

    for entry in fallback::dataset() {
        match resolver.get_by_id(&entry.id).await {
            Lookup::Found(resolved) => {
                assert_eq!(resolved.source, Source::Fallback);
                assert_eq!(resolved.advisory, None);
                assert!(!resolved.value.title.is_empty());
                assert!(!resolved.value.gallery().is_empty());
                assert_eq!(resolved.value, entry);
            }
            Lookup::NotFound => panic!("{} should resolve offline", entry.id),
        }
    }
}

#[tokio::test]
async fn test_remote_entry_takes_precedence() {
    let (store, client) = MemoryStore::with_entries(8, vec![featured("raw-denim", "Raw Denim (2025 run)")]);
    let handle = tokio::spawn(store.run());

    let resolver = CatalogResolver::new(Some(Arc::new(client)));
    let entry = resolver.get_by_id("raw-denim").await.into_entry().unwrap();
    assert_eq!(entry.title, "Raw Denim (2025 run)");
    assert_eq!(entry.description, "remote description");

    drop(resolver);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_remote_serves_offline_views() {
    let store = Arc::new(DownStore::default());
    let resolver = CatalogResolver::new(Some(store.clone()));
    let offline = fallback::dataset();

    let all = resolver.list_all().await;
    assert_eq!(all.value, offline);
    assert_eq!(all.source, Source::Fallback);
    let advisory = all.advisory.expect("remote failure is signalled");
    assert_eq!(advisory.message, "Failed to load collections from database. Using offline data.");
    assert!(advisory.detail.contains("connection refused"));

    for entry in &offline {
        assert_eq!(resolver.get_by_id(&entry.id).await.entry(), Some(entry));
    }

    let featured = resolver.list_featured(4).await;
    assert_eq!(featured.value, offline[..4].to_vec());
    assert!(featured.advisory.is_some());

    assert_eq!(store.calls.load(Ordering::SeqCst), 2 + offline.len());
}

#[tokio::test]
async fn test_unknown_id_is_not_found_in_every_setup() {
    assert_eq!(CatalogResolver::offline().get_by_id("does-not-exist").await, Lookup::NotFound);

    let down = CatalogResolver::new(Some(Arc::new(DownStore::default())));
    assert_eq!(down.get_by_id("does-not-exist").await, Lookup::NotFound);

    let (store, client) = MemoryStore::new(8);
    tokio::spawn(store.run());
    let empty = CatalogResolver::new(Some(Arc::new(client)));
    assert_eq!(empty.get_by_id("does-not-exist").await, Lookup::NotFound);
}

#[tokio::test]
async fn test_featured_never_exceeds_limit() {
    let offline = CatalogResolver::offline();
    for limit in 0..=8 {
        let featured = offline.list_featured(limit).await;
        assert!(featured.value.len() <= limit);
    }

    let remote: Vec<_> = (0..6).map(|i| featured(&format!("f{i}"), "Featured")).collect();
    let (store, client) = MemoryStore::with_entries(8, remote);
    tokio::spawn(store.run());
    let resolver = CatalogResolver::new(Some(Arc::new(client)));

    let top = resolver.list_featured(3).await;
    assert_eq!(top.value.len(), 3);
    assert_eq!(top.source, Source::Remote);
}

#[tokio::test]
async fn test_unconfigured_featured_takes_first_three_offline_entries() {
    let offline = fallback::dataset();
    let featured = CatalogResolver::offline().list_featured(3).await;

    assert_eq!(featured.value, offline[..3].to_vec());
    assert_eq!(featured.source, Source::Fallback);
    assert_eq!(featured.advisory, None);
}

#[tokio::test]
async fn test_malformed_id_query_error_ends_in_not_found() {
    let mock = MockStore::new();
    mock.expect_get("abc").return_err(StoreError::Query {
        status: 400,
        message: "invalid input syntax for type uuid: \"abc\" (22P02)".into(),
    });

    let resolver = CatalogResolver::new(Some(Arc::new(mock.clone())));
    assert_eq!(resolver.get_by_id("abc").await, Lookup::NotFound);
    mock.verify();
}

#[tokio::test]
async fn test_remote_without_featured_rows_falls_back_silently() {
    let (store, client) = MemoryStore::with_entries(
        8,
        vec![CatalogEntry::new("plain", "Plain", "Denim", "d", "ld", "img")],
    );
    tokio::spawn(store.run());
    let resolver = CatalogResolver::new(Some(Arc::new(client)));

    let featured = resolver.list_featured(2).await;
    assert_eq!(featured.source, Source::Fallback);
    assert_eq!(featured.advisory, None);
    assert_eq!(featured.value, fallback::dataset()[..2].to_vec());

    let all = resolver.list_all().await;
    assert_eq!(all.source, Source::Remote);
    assert_eq!(all.value.len(), 1);
}

#[tokio::test]
async fn test_empty_remote_catalog_is_not_replaced() {
    let (store, client) = MemoryStore::new(8);
    tokio::spawn(store.run());
    let resolver = CatalogResolver::new(Some(Arc::new(client)));

    let all = resolver.list_all().await;
    assert!(all.value.is_empty());
    assert_eq!(all.source, Source::Remote);

    assert!(resolver.get_by_id("raw-denim").await.is_found());
}
