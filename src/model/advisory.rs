use serde::Serialize;
use std::fmt::Display;

/// A non-fatal notice for the user.
///
/// Advisories never interrupt the primary flow; the caller decides whether and
/// how to show them (a toast, a stderr line, ...). They carry plain text only,
/// so nothing store-specific leaks past the component that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    /// User-facing message.
    pub message: String,
    /// Short description of the underlying cause, for logs and support.
    pub detail: String,
}

impl Advisory {
    pub fn new(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: detail.into(),
        }
    }

    /// Catalog data came from the offline dataset because the remote store failed.
    pub fn offline_catalog(detail: impl Display) -> Self {
        Self::new(
            "Failed to load collections from database. Using offline data.",
            detail.to_string(),
        )
    }

    /// A lead could not be stored but the user was told it was sent.
    pub fn lead_not_saved(detail: impl Display) -> Self {
        Self::new(
            "Failed to save message to database, but we simulated success for demo.",
            detail.to_string(),
        )
    }
}

impl Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
