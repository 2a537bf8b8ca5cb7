//! # Catalog
//!
//! Remote-first access to the product catalog with an offline fallback.
//!
//! ## Structure
//!
//! - [`resolver`] - [`CatalogResolver`] and its result types
//! - [`policy`] - per-operation handling of empty remote answers
//! - [`fallback`] - the bundled offline dataset
//!
//! ## Usage
//!
//! ```rust
//! use wrapweft::catalog::{CatalogResolver, Lookup};
//!
//! #[tokio::main]
//! async fn main() {
//!     let resolver = CatalogResolver::offline();
//!
//!     let all = resolver.list_all().await;
//!     assert_eq!(all.value.len(), 6);
//!
//!     assert!(resolver.get_by_id("raw-denim").await.is_found());
//!     assert_eq!(resolver.get_by_id("nope").await, Lookup::NotFound);
//! }
//! ```

pub mod fallback;
pub mod policy;
pub mod resolver;

pub use policy::{EmptyRemote, ResolutionPolicy};
pub use resolver::{CatalogResolver, Lookup, Resolved, Source};
