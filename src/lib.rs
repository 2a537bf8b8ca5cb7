//! # Wrap Weft & Co
//!
//! > **Catalog resolution and company deck export for a textile supplier site.**
//!
//! The site shows a product catalog that normally lives in a remote database.
//! The database may be missing, unreachable or empty, and the site must keep
//! working in every case. This crate owns that logic, plus the export of a
//! company presentation built from the same catalog.
//!
//! ## Design
//!
//! ### Remote first, offline always
//! Every catalog read goes through [`catalog::CatalogResolver`]. It tries the
//! remote store, and falls back to a bundled dataset when the store is not
//! configured, fails, or (for some operations) has no matching rows. Callers
//! never see a store error: they get data, fallback data with an optional
//! [`model::Advisory`], or "not found".
//!
//! ### Explicit policies
//! Two behaviors that are easy to get wrong are data, not control flow:
//! - [`catalog::ResolutionPolicy`] says per operation whether an empty remote
//!   answer is trusted or replaced by offline data.
//! - [`config::ContactConfig::report_failure_to_user`] says whether a failed
//!   lead insert is reported or masked behind the normal success message.
//!
//! ### Injected capabilities
//! Stores ([`store::CatalogStore`], [`store::LeadStore`]), the document engine
//! ([`deck::DeckEngine`]) and the file destination ([`deck::DeckSink`]) are
//! traits handed in at construction. Nothing reads global state;
//! [`config::SiteConfig`] is resolved once and passed by reference.
//!
//! ### Observability
//! `tracing` everywhere. Every fallback caused by a failure is a `warn!`.
//! See [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! - [`model`] - catalog entries, leads, advisories
//! - [`store`] - store traits and the REST, in-memory and mock adapters
//! - [`catalog`] - the resolver, its policy and the offline dataset
//! - [`contact`] - lead submission and contact-form helpers
//! - [`deck`] - deck layout, PPTX serialization and file delivery
//! - [`config`] - TOML + environment configuration
//! - [`lifecycle`] - wiring ([`lifecycle::Storefront`]) and logging setup
//!
//! ## Testing
//!
//! [`store::MockStore`] queues expected calls and canned answers, which is
//! how failure paths are exercised. [`store::MemoryStore`] runs a real store
//! actor for end-to-end flows.

pub mod catalog;
pub mod config;
pub mod contact;
pub mod deck;
pub mod lifecycle;
pub mod model;
pub mod store;
