//! # Lifecycle
//!
//! Process-level wiring: logging setup and the [`Storefront`] that builds the
//! catalog, contact and deck services from a resolved [`SiteConfig`](crate::config::SiteConfig).
//!
//! ```rust,no_run
//! use wrapweft::config::SiteConfig;
//! use wrapweft::lifecycle::Storefront;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SiteConfig::resolve(None)?;
//! let storefront = Storefront::from_config(&config)?;
//!
//! let featured = storefront.catalog.list_featured(3).await;
//! println!("{} featured", featured.value.len());
//!
//! storefront.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod storefront;
pub mod tracing;

pub use self::tracing::setup_tracing;
pub use storefront::Storefront;
