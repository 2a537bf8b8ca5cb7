//! Error types for lead submission.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ContactError {
    /// The lead store rejected or never received the lead.
    #[error("Failed to deliver message: {0}")]
    Delivery(String),
}

impl From<crate::store::StoreError> for ContactError {
    fn from(e: crate::store::StoreError) -> Self {
        ContactError::Delivery(e.to_string())
    }
}
