use super::error::DeckError;
use super::layout::Deck;
use async_trait::async_trait;

/// A document-generation backend.
///
/// Turns an engine-neutral [`Deck`] into file bytes. Callers must check
/// [`is_ready`](DeckEngine::is_ready) before asking for a serialization.
#[async_trait]
pub trait DeckEngine: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn is_ready(&self) -> bool {
        true
    }

    async fn serialize(&self, deck: &Deck) -> Result<Vec<u8>, DeckError>;
}
