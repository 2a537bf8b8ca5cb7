//! Per-operation handling of an empty-but-successful remote answer.
//!
//! A remote failure always falls back. An empty answer is different: for the
//! full listing an empty catalog is meaningful state, while a missing detail
//! row or an uncurated featured list should be filled from the offline data.
//! Keeping this as data stops the three call sites from drifting apart.

/// What to do when the remote store answers successfully with no matching rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyRemote {
    /// Return the empty remote result.
    Trust,
    /// Serve the offline dataset instead.
    FallBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionPolicy {
    pub list_all: EmptyRemote,
    pub get_by_id: EmptyRemote,
    pub list_featured: EmptyRemote,
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            list_all: EmptyRemote::Trust,
            get_by_id: EmptyRemote::FallBack,
            list_featured: EmptyRemote::FallBack,
        }
    }
}
