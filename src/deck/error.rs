//! Error types for deck export.

use thiserror::Error;

/// Errors that end a single export. No partial file is left behind.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The generation engine cannot be used right now.
    #[error("Presentation generator not ready. Please try again in a moment.")]
    GeneratorNotReady,

    /// The engine rejected the deck.
    #[error("Failed to serialize deck: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
