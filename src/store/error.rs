//! # Store Errors
//!
//! Every remote store adapter reports failures through [`StoreError`]. The
//! variants separate "the request never completed" (transport) from "the
//! store answered with an error" (query), which is the distinction the
//! resolver's fallback chain needs. Zero rows is *not* an error: adapters
//! return an empty collection or `None` for that.

use thiserror::Error;

/// Errors that can occur while talking to a remote store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// No remote store is configured.
    #[error("Remote store not configured")]
    NotConfigured,

    /// The request could not be sent or the connection failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The store rejected the request (bad filter, malformed id, ...).
    #[error("Query failed with status {status}: {message}")]
    Query { status: u16, message: String },

    /// The response body did not match the expected row shape.
    #[error("Response decode error: {0}")]
    Decode(String),

    /// The in-memory store actor is no longer running.
    #[error("Store actor closed")]
    ActorClosed,

    /// The in-memory store actor dropped the response channel.
    #[error("Store actor dropped response channel")]
    ActorDropped,
}

impl StoreError {
    /// True when the request never reached a store that could answer it.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            StoreError::Transport(_) | StoreError::ActorClosed | StoreError::ActorDropped
        )
    }

    /// True when the store answered but rejected the request.
    pub fn is_query(&self) -> bool {
        matches!(self, StoreError::Query { .. })
    }
}

