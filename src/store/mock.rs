//! # Mock Store
//!
//! An expectation queue that implements [`CatalogStore`] and [`LeadStore`].
//! Each call pops the next expectation and returns its canned response, which
//! makes it easy to simulate failures that are hard to reproduce against a
//! real store (timeouts, rejected filters, malformed ids).
//!
//! ```rust
//! use wrapweft::store::{CatalogStore, MockStore, StoreError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockStore::new();
//!     mock.expect_list_all()
//!         .return_err(StoreError::Transport("connection refused".into()));
//!
//!     assert!(mock.list_all().await.is_err());
//!     mock.verify();
//! }
//! ```
//!
//! A request that does not match the next expectation panics, as does
//! [`MockStore::verify`] when expectations are left over.

use super::{CatalogStore, LeadStore, StoreError};
use crate::model::{CatalogEntry, ContactLead};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// An expected request and the response to hand back.
#[derive(Debug)]
enum Expectation {
    ListAll {
        response: Result<Vec<CatalogEntry>, StoreError>,
    },
    Get {
        id: String,
        response: Result<Option<CatalogEntry>, StoreError>,
    },
    Featured {
        limit: usize,
        response: Result<Vec<CatalogEntry>, StoreError>,
    },
    InsertLead {
        response: Result<(), StoreError>,
    },
}

type Queue = Arc<Mutex<VecDeque<Expectation>>>;

/// A fake store driven by queued expectations.
///
/// Cloning shares the queue, so a test can keep one handle for `verify()`
/// and give another to the code under test.
#[derive(Clone, Default)]
pub struct MockStore {
    expectations: Queue,
}

impl MockStore {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `list_all` call.
    pub fn expect_list_all(&self) -> ListAllExpectationBuilder {
        ListAllExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get_by_id` call for `id`.
    pub fn expect_get(&self, id: impl Into<String>) -> GetExpectationBuilder {
        GetExpectationBuilder {
            id: id.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `list_featured` call with `limit`.
    pub fn expect_featured(&self, limit: usize) -> FeaturedExpectationBuilder {
        FeaturedExpectationBuilder {
            limit,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `insert_lead` call.
    pub fn expect_insert_lead(&self) -> InsertLeadExpectationBuilder {
        InsertLeadExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let exps = lock(&self.expectations);
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn next(&self, request: &str) -> Expectation {
        lock(&self.expectations)
            .pop_front()
            .unwrap_or_else(|| panic!("Unexpected request: {request} (no expectations left)"))
    }
}

fn lock(queue: &Queue) -> std::sync::MutexGuard<'_, VecDeque<Expectation>> {
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn push(queue: &Queue, expectation: Expectation) {
    lock(queue).push_back(expectation);
}

#[async_trait]
impl CatalogStore for MockStore {
    async fn list_all(&self) -> Result<Vec<CatalogEntry>, StoreError> {
        match self.next("list_all") {
            Expectation::ListAll { response } => response,
            other => panic!("Unexpected request: list_all, expected {other:?}"),
        }
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<CatalogEntry>, StoreError> {
        match self.next("get_by_id") {
            Expectation::Get {
                id: expected,
                response,
            } => {
                assert_eq!(expected, id, "get_by_id called with unexpected id");
                response
            }
            other => panic!("Unexpected request: get_by_id({id}), expected {other:?}"),
        }
    }

    async fn list_featured(&self, limit: usize) -> Result<Vec<CatalogEntry>, StoreError> {
        match self.next("list_featured") {
            Expectation::Featured {
                limit: expected,
                response,
            } => {
                assert_eq!(expected, limit, "list_featured called with unexpected limit");
                response
            }
            other => panic!("Unexpected request: list_featured({limit}), expected {other:?}"),
        }
    }
}

#[async_trait]
impl LeadStore for MockStore {
    async fn insert_lead(&self, _lead: &ContactLead) -> Result<(), StoreError> {
        match self.next("insert_lead") {
            Expectation::InsertLead { response } => response,
            other => panic!("Unexpected request: insert_lead, expected {other:?}"),
        }
    }
}

/// Builder for `list_all` expectations.
pub struct ListAllExpectationBuilder {
    expectations: Queue,
}

impl ListAllExpectationBuilder {
    pub fn return_ok(self, rows: Vec<CatalogEntry>) {
        push(&self.expectations, Expectation::ListAll { response: Ok(rows) });
    }

    pub fn return_err(self, error: StoreError) {
        push(&self.expectations, Expectation::ListAll { response: Err(error) });
    }
}

/// Builder for `get_by_id` expectations.
pub struct GetExpectationBuilder {
    id: String,
    expectations: Queue,
}

impl GetExpectationBuilder {
    pub fn return_ok(self, row: Option<CatalogEntry>) {
        push(
            &self.expectations,
            Expectation::Get {
                id: self.id,
                response: Ok(row),
            },
        );
    }

    pub fn return_err(self, error: StoreError) {
        push(
            &self.expectations,
            Expectation::Get {
                id: self.id,
                response: Err(error),
            },
        );
    }
}

/// Builder for `list_featured` expectations.
pub struct FeaturedExpectationBuilder {
    limit: usize,
    expectations: Queue,
}

impl FeaturedExpectationBuilder {
    pub fn return_ok(self, rows: Vec<CatalogEntry>) {
        push(
            &self.expectations,
            Expectation::Featured {
                limit: self.limit,
                response: Ok(rows),
            },
        );
    }

    pub fn return_err(self, error: StoreError) {
        push(
            &self.expectations,
            Expectation::Featured {
                limit: self.limit,
                response: Err(error),
            },
        );
    }
}

/// Builder for `insert_lead` expectations.
pub struct InsertLeadExpectationBuilder {
    expectations: Queue,
}

impl InsertLeadExpectationBuilder {
    pub fn return_ok(self) {
        push(&self.expectations, Expectation::InsertLead { response: Ok(()) });
    }

    pub fn return_err(self, error: StoreError) {
        push(&self.expectations, Expectation::InsertLead { response: Err(error) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_with_expectations() {
        let mock = MockStore::new();
        let entry = CatalogEntry::new("a", "A", "Denim", "d", "ld", "img");

        mock.expect_get("a").return_ok(Some(entry.clone()));
        mock.expect_featured(3).return_ok(vec![]);

        let store = mock.clone();
        assert_eq!(store.get_by_id("a").await.unwrap(), Some(entry));
        assert!(store.list_featured(3).await.unwrap().is_empty());

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_panics_on_leftovers() {
        let mock = MockStore::new();
        mock.expect_list_all().return_ok(vec![]);
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected request")]
    async fn test_mismatched_request_panics() {
        let mock = MockStore::new();
        mock.expect_list_all().return_ok(vec![]);
        let _ = mock.get_by_id("a").await;
    }
}
