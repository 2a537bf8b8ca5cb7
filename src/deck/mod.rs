//! # Deck
//!
//! Builds the company presentation from the resolved catalog and writes it
//! out through a pluggable engine.
//!
//! ## Pipeline
//!
//! ```text
//! CatalogResolver::list_all ─► DeckBuilder::build ─► DeckEngine::serialize ─► DeckSink::deliver
//! ```
//!
//! - [`layout`] - engine-neutral slide model
//! - [`builder`] - the five-slide layout and its grid/stack arithmetic
//! - [`content`] - fixed copy, overridable from config
//! - [`engine`] / [`pptx`] - serialization seam and its OOXML adapter
//! - [`sink`] - where finished files go
//!
//! An export either produces a complete file or fails with a [`DeckError`];
//! it never leaves a partial file behind.

pub mod builder;
pub mod content;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pptx;
pub mod sink;

pub use builder::{grid_cell, DeckBuilder, GridCell, MASTER_NAME};
pub use content::DeckContent;
pub use engine::DeckEngine;
pub use error::DeckError;
pub use layout::Deck;
pub use pptx::PptxEngine;
pub use sink::{DeckSink, FileSink};

use crate::catalog::CatalogResolver;
use crate::config::DeckConfig;
use crate::model::Advisory;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckExport {
    pub location: PathBuf,
    pub slides: usize,
    /// Set when the catalog came from offline data because the remote failed.
    pub advisory: Option<Advisory>,
}

/// Runs the export pipeline end to end.
#[derive(Clone)]
pub struct DeckService {
    resolver: CatalogResolver,
    engine: Arc<dyn DeckEngine>,
    sink: Arc<dyn DeckSink>,
    content: DeckContent,
    file_name: String,
}

impl DeckService {
    pub fn new(
        resolver: CatalogResolver,
        engine: Arc<dyn DeckEngine>,
        sink: Arc<dyn DeckSink>,
        config: &DeckConfig,
    ) -> Self {
        Self {
            resolver,
            engine,
            sink,
            content: config.content.clone(),
            file_name: config.file_name.clone(),
        }
    }

    /// Same pipeline, different destination.
    pub fn with_sink(mut self, sink: Arc<dyn DeckSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_engine(mut self, engine: Arc<dyn DeckEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Resolves the catalog and builds the deck without serializing it.
    pub async fn preview(&self) -> (Deck, Option<Advisory>) {
        let catalog = self.resolver.list_all().await;
        let deck = DeckBuilder::new(&self.content).build(&catalog.value);
        (deck, catalog.advisory)
    }

    #[instrument(skip(self), fields(engine = self.engine.name()))]
    pub async fn export(&self) -> Result<DeckExport, DeckError> {
        if !self.engine.is_ready() {
            error!("Generation engine not ready");
            return Err(DeckError::GeneratorNotReady);
        }

        let (deck, advisory) = self.preview().await;
        let bytes = self.engine.serialize(&deck).await?;
        let location = self.sink.deliver(&self.file_name, bytes).await?;

        info!(path = %location.display(), slides = deck.slides.len(), "Deck exported");
        Ok(DeckExport {
            location,
            slides: deck.slides.len(),
            advisory,
        })
    }
}
