//! # Contact
//!
//! Lead capture: the form state, subject pre-fill from detail pages, and the
//! submitter that writes leads to the lead store.
//!
//! A failed insert is either reported to the visitor or masked behind the
//! normal success message, depending on
//! [`ContactConfig::report_failure_to_user`](crate::config::ContactConfig).
//! Masked failures are still logged at `warn` and carry an [`Advisory`](crate::model::Advisory).

pub mod error;
pub mod form;
pub mod submitter;

pub use error::ContactError;
pub use form::{ContactForm, Inquiry};
pub use submitter::{LeadSubmitter, SubmissionOutcome, SUCCESS_MESSAGE};
