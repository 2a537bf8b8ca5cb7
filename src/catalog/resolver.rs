//! # Catalog Resolver
//!
//! Produces a consistent view of the catalog whether or not the remote store
//! is configured, reachable, or has usable rows. Every operation walks the
//! same priority chain and stops at the first usable source:
//!
//! 1. No remote configured → offline dataset, silently.
//! 2. Remote call failed → offline dataset plus an [`Advisory`].
//! 3. Remote answered with no matching rows → governed by [`ResolutionPolicy`].
//! 4. Otherwise → the remote rows as-is.
//!
//! Nothing store-specific escapes: callers get [`Resolved`] values or
//! [`Lookup::NotFound`], never a [`StoreError`].
//!
//! Each call issues at most one remote request. There is no caching, no retry
//! and no state carried between calls.

use super::fallback;
use super::policy::{EmptyRemote, ResolutionPolicy};
use crate::model::{Advisory, CatalogEntry};
use crate::store::{CatalogStore, StoreError};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Remote,
    Fallback,
}

/// A value plus its provenance and an optional user-facing notice.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: Source,
    /// Set only when a remote failure forced the fallback.
    pub advisory: Option<Advisory>,
}

impl<T> Resolved<T> {
    fn remote(value: T) -> Self {
        Self {
            value,
            source: Source::Remote,
            advisory: None,
        }
    }

    fn fallback(value: T, advisory: Option<Advisory>) -> Self {
        Self {
            value,
            source: Source::Fallback,
            advisory,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == Source::Fallback
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            value: f(self.value),
            source: self.source,
            advisory: self.advisory,
        }
    }
}

/// Outcome of a single-entry lookup.
///
/// `NotFound` is a terminal answer, not an error: neither source knows the id.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Resolved<CatalogEntry>),
    NotFound,
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn entry(&self) -> Option<&CatalogEntry> {
        match self {
            Lookup::Found(resolved) => Some(&resolved.value),
            Lookup::NotFound => None,
        }
    }

    pub fn into_entry(self) -> Option<CatalogEntry> {
        match self {
            Lookup::Found(resolved) => Some(resolved.value),
            Lookup::NotFound => None,
        }
    }
}

/// Result of the remote leg, before the policy is applied.
enum Attempt<T> {
    Unconfigured,
    Failed(StoreError),
    Empty(T),
    Rows(T),
}

impl<T> Attempt<T> {
    fn from_result(result: Result<T, StoreError>, is_empty: impl FnOnce(&T) -> bool) -> Self {
        match result {
            Err(e) => Attempt::Failed(e),
            Ok(value) if is_empty(&value) => Attempt::Empty(value),
            Ok(value) => Attempt::Rows(value),
        }
    }
}

/// Remote-first catalog access with an offline fallback.
///
/// Cheap to clone; clones share the store handle and the fallback data.
#[derive(Clone)]
pub struct CatalogResolver {
    remote: Option<Arc<dyn CatalogStore>>,
    fallback: Arc<[CatalogEntry]>,
    policy: ResolutionPolicy,
}

impl CatalogResolver {
    /// Resolver over `remote` (or none) with the bundled offline dataset.
    pub fn new(remote: Option<Arc<dyn CatalogStore>>) -> Self {
        Self {
            remote,
            fallback: fallback::dataset().into(),
            policy: ResolutionPolicy::default(),
        }
    }

    /// Resolver that never touches a remote store.
    pub fn offline() -> Self {
        Self::new(None)
    }

    /// Replaces the offline dataset.
    pub fn with_fallback(mut self, entries: Vec<CatalogEntry>) -> Self {
        self.fallback = entries.into();
        self
    }

    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn is_remote_configured(&self) -> bool {
        self.remote.is_some()
    }

    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Every entry, in remote order on success or fixed offline order otherwise.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Resolved<Vec<CatalogEntry>> {
        let attempt = match &self.remote {
            None => Attempt::Unconfigured,
            Some(store) => Attempt::from_result(store.list_all().await, |rows| rows.is_empty()),
        };
        let resolved = self.settle("list_all", attempt, self.policy.list_all, || {
            self.fallback.to_vec()
        });
        info!(source = ?resolved.source, count = resolved.value.len(), "Resolved");
        resolved
    }

    /// Exact-id lookup: remote first, then a linear scan of the offline data.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Lookup {
        let attempt = match &self.remote {
            None => Attempt::Unconfigured,
            Some(store) => Attempt::from_result(store.get_by_id(id).await, Option::is_none),
        };
        let resolved = self.settle("get_by_id", attempt, self.policy.get_by_id, || {
            self.fallback.iter().find(|entry| entry.id == id).cloned()
        });

        match resolved.value {
            Some(entry) => {
                info!(source = ?resolved.source, "Found");
                Lookup::Found(Resolved {
                    value: entry,
                    source: resolved.source,
                    advisory: resolved.advisory,
                })
            }
            None => {
                info!("Not found");
                Lookup::NotFound
            }
        }
    }

    /// At most `limit` featured entries.
    ///
    /// Without curated remote rows, the first `limit` offline entries stand in.
    #[instrument(skip(self))]
    pub async fn list_featured(&self, limit: usize) -> Resolved<Vec<CatalogEntry>> {
        let attempt = match &self.remote {
            None => Attempt::Unconfigured,
            Some(store) => {
                let result = store.list_featured(limit).await.map(|rows| {
                    rows.into_iter()
                        .filter(CatalogEntry::is_featured)
                        .take(limit)
                        .collect::<Vec<_>>()
                });
                Attempt::from_result(result, |rows| rows.is_empty())
            }
        };
        let resolved = self.settle("list_featured", attempt, self.policy.list_featured, || {
            self.fallback.iter().take(limit).cloned().collect()
        });
        info!(source = ?resolved.source, count = resolved.value.len(), "Resolved");
        resolved
    }

    fn settle<T>(
        &self,
        operation: &'static str,
        attempt: Attempt<T>,
        on_empty: EmptyRemote,
        fallback: impl FnOnce() -> T,
    ) -> Resolved<T> {
        match attempt {
            Attempt::Unconfigured => {
                debug!(operation, "Remote store not configured, using offline data");
                Resolved::fallback(fallback(), None)
            }
            Attempt::Failed(e) => {
                warn!(operation, error = %e, "Remote store failed, using offline data");
                Resolved::fallback(fallback(), Some(Advisory::offline_catalog(&e)))
            }
            Attempt::Empty(value) => match on_empty {
                EmptyRemote::Trust => {
                    debug!(operation, "Remote store returned no rows");
                    Resolved::remote(value)
                }
                EmptyRemote::FallBack => {
                    debug!(operation, "Remote store returned no rows, using offline data");
                    Resolved::fallback(fallback(), None)
                }
            },
            Attempt::Rows(value) => Resolved::remote(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockStore;
    use pretty_assertions::assert_eq;

    fn remote_entry(id: &str) -> CatalogEntry {
        CatalogEntry::new(id, "Remote Title", "Denim", "remote", "remote long", "remote.jpg").featured(true)
    }

    fn resolver(mock: &MockStore) -> CatalogResolver {
        CatalogResolver::new(Some(Arc::new(mock.clone())))
    }

    #[tokio::test]
    async fn test_every_offline_id_resolves_without_remote() {
        let resolver = CatalogResolver::offline();
        for entry in fallback::dataset() {
            let lookup = resolver.get_by_id(&entry.id).await;
            assert_eq!(lookup.entry(), Some(&entry));
        }
    }

    #[tokio::test]
    async fn test_remote_entry_wins_over_offline_entry() {
        let mock = MockStore::new();
        mock.expect_get("raw-denim").return_ok(Some(remote_entry("raw-denim")));

        let lookup = resolver(&mock).get_by_id("raw-denim").await;
        match lookup {
            Lookup::Found(resolved) => {
                assert_eq!(resolved.source, Source::Remote);
                assert_eq!(resolved.value.title, "Remote Title");
                assert_eq!(resolved.advisory, None);
            }
            Lookup::NotFound => panic!("expected remote entry"),
        }
        mock.verify();
    }

    #[tokio::test]
    async fn test_failing_remote_degrades_every_operation() {
        let mock = MockStore::new();
        let err = StoreError::Transport("connection refused".into());
        mock.expect_list_all().return_err(err.clone());
        mock.expect_get("stretch-tech").return_err(err.clone());
        mock.expect_featured(3).return_err(err);

        let resolver = resolver(&mock);
        let offline = fallback::dataset();

        let all = resolver.list_all().await;
        assert_eq!(all.value, offline);
        assert!(all.is_fallback());
        assert!(all.advisory.is_some());

        let one = resolver.get_by_id("stretch-tech").await;
        assert_eq!(one.entry(), Some(&offline[2]));

        let featured = resolver.list_featured(3).await;
        assert_eq!(featured.value, offline[..3].to_vec());
        assert!(featured.advisory.is_some());

        mock.verify();
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found_either_way() {
        assert_eq!(CatalogResolver::offline().get_by_id("does-not-exist").await, Lookup::NotFound);

        let mock = MockStore::new();
        mock.expect_get("does-not-exist").return_ok(None);
        assert_eq!(resolver(&mock).get_by_id("does-not-exist").await, Lookup::NotFound);
        mock.verify();
    }

    #[tokio::test]
    async fn test_query_error_on_unknown_id_is_not_found() {
        let mock = MockStore::new();
        mock.expect_get("abc").return_err(StoreError::Query {
            status: 400,
            message: "invalid input syntax for type uuid: \"abc\"".into(),
        });

        assert_eq!(resolver(&mock).get_by_id("abc").await, Lookup::NotFound);
        mock.verify();
    }

    #[tokio::test]
    async fn test_empty_remote_listing_is_trusted() {
        let mock = MockStore::new();
        mock.expect_list_all().return_ok(vec![]);

        let all = resolver(&mock).list_all().await;
        assert!(all.value.is_empty());
        assert_eq!(all.source, Source::Remote);
        assert_eq!(all.advisory, None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_empty_featured_falls_back_without_advisory() {
        let mock = MockStore::new();
        mock.expect_featured(2).return_ok(vec![]);

        let featured = resolver(&mock).list_featured(2).await;
        assert!(featured.is_fallback());
        assert_eq!(featured.advisory, None);
        assert_eq!(featured.value.len(), 2);
        mock.verify();
    }

    #[tokio::test]
    async fn test_featured_is_capped_even_if_store_overshoots() {
        let mock = MockStore::new();
        mock.expect_featured(3).return_ok(
            ["a", "b", "c", "d", "e"].iter().map(|id| remote_entry(id)).collect(),
        );

        let featured = resolver(&mock).list_featured(3).await;
        assert_eq!(featured.value.len(), 3);
        assert_eq!(featured.source, Source::Remote);
        mock.verify();
    }

    #[tokio::test]
    async fn test_offline_featured_takes_first_entries_in_order() {
        let featured = CatalogResolver::offline().list_featured(3).await;
        let ids: Vec<_> = featured.value.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["raw-denim", "sustainable-blends", "stretch-tech"]);
        assert_eq!(featured.advisory, None);
    }

    #[tokio::test]
    async fn test_policy_can_trust_empty_detail_lookup() {
        let mock = MockStore::new();
        mock.expect_get("raw-denim").return_ok(None);

        let policy = ResolutionPolicy {
            get_by_id: EmptyRemote::Trust,
            ..ResolutionPolicy::default()
        };
        let lookup = resolver(&mock).with_policy(policy).get_by_id("raw-denim").await;
        assert_eq!(lookup, Lookup::NotFound);
        mock.verify();
    }
}
