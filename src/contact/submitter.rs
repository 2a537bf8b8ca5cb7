use super::error::ContactError;
use crate::config::ContactConfig;
use crate::model::{Advisory, ContactLead};
use crate::store::LeadStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Text shown to the visitor once a lead has been accepted.
pub const SUCCESS_MESSAGE: &str = "Message sent successfully! We will get back to you shortly.";

/// What happened to a submitted lead.
///
/// All three variants mean the visitor is told the message was sent.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The lead store accepted the insert.
    Delivered,
    /// No lead store is configured; nothing was stored.
    Simulated,
    /// The insert failed and the failure was hidden from the visitor.
    Masked { advisory: Advisory },
}

impl SubmissionOutcome {
    pub fn user_message(&self) -> &'static str {
        SUCCESS_MESSAGE
    }

    pub fn advisory(&self) -> Option<&Advisory> {
        match self {
            SubmissionOutcome::Masked { advisory } => Some(advisory),
            _ => None,
        }
    }

    pub fn is_stored(&self) -> bool {
        matches!(self, SubmissionOutcome::Delivered)
    }
}

/// Sends leads to the lead store under an explicit failure-reporting policy.
#[derive(Clone)]
pub struct LeadSubmitter {
    store: Option<Arc<dyn LeadStore>>,
    report_failure_to_user: bool,
    simulated_delay: Duration,
}

impl LeadSubmitter {
    pub fn new(store: Option<Arc<dyn LeadStore>>, config: &ContactConfig) -> Self {
        Self {
            store,
            report_failure_to_user: config.report_failure_to_user,
            simulated_delay: Duration::from_millis(config.simulated_delay_ms),
        }
    }

    pub fn reports_failures(&self) -> bool {
        self.report_failure_to_user
    }

    /// Submits one lead.
    ///
    /// Returns `Err` only when the store fails and failures are reported to
    /// the user; otherwise a failed insert becomes [`SubmissionOutcome::Masked`].
    #[instrument(skip(self, lead), fields(email = %lead.email))]
    pub async fn submit(&self, lead: &ContactLead) -> Result<SubmissionOutcome, ContactError> {
        debug!(?lead, "submit called");

        let Some(store) = &self.store else {
            info!("Lead store not configured, simulating delivery");
            if !self.simulated_delay.is_zero() {
                tokio::time::sleep(self.simulated_delay).await;
            }
            return Ok(SubmissionOutcome::Simulated);
        };

        match store.insert_lead(lead).await {
            Ok(()) => {
                info!("Lead delivered");
                Ok(SubmissionOutcome::Delivered)
            }
            Err(e) if self.report_failure_to_user => {
                error!(error = %e, "Lead delivery failed");
                Err(e.into())
            }
            Err(e) => {
                warn!(error = %e, "Lead delivery failed, reporting success to user");
                Ok(SubmissionOutcome::Masked {
                    advisory: Advisory::lead_not_saved(&e),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MockStore, StoreError};

    fn lead() -> ContactLead {
        ContactLead::new("Ada", "Weaver", "ada@example.com", "Spec Sheet: Raw Denim Series", "Hi")
    }

    fn config(report: bool) -> ContactConfig {
        ContactConfig {
            report_failure_to_user: report,
            simulated_delay_ms: 0,
        }
    }

    #[tokio::test]
    async fn test_unconfigured_store_simulates() {
        let submitter = LeadSubmitter::new(None, &config(true));
        let outcome = submitter.submit(&lead()).await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::Simulated);
        assert_eq!(outcome.user_message(), SUCCESS_MESSAGE);
        assert!(!outcome.is_stored());
    }

    #[tokio::test]
    async fn test_simulated_delay_is_applied() {
        let submitter = LeadSubmitter::new(
            None,
            &ContactConfig {
                report_failure_to_user: false,
                simulated_delay_ms: 20,
            },
        );
        let started = std::time::Instant::now();
        submitter.submit(&lead()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_successful_insert_is_delivered() {
        let mock = MockStore::new();
        mock.expect_insert_lead().return_ok();

        let submitter = LeadSubmitter::new(Some(Arc::new(mock.clone())), &config(false));
        assert_eq!(submitter.submit(&lead()).await, Ok(SubmissionOutcome::Delivered));
        mock.verify();
    }

    #[tokio::test]
    async fn test_failure_is_masked_by_default_policy() {
        let mock = MockStore::new();
        mock.expect_insert_lead()
            .return_err(StoreError::Transport("connection reset".into()));

        let submitter = LeadSubmitter::new(Some(Arc::new(mock.clone())), &config(false));
        let outcome = submitter.submit(&lead()).await.unwrap();
        let advisory = outcome.advisory().expect("masked failure carries an advisory");
        assert_eq!(
            advisory.message,
            "Failed to save message to database, but we simulated success for demo."
        );
        assert_eq!(outcome.user_message(), SUCCESS_MESSAGE);
        mock.verify();
    }

    #[tokio::test]
    async fn test_failure_is_reported_when_policy_says_so() {
        let mock = MockStore::new();
        mock.expect_insert_lead().return_err(StoreError::Query {
            status: 401,
            message: "Invalid API key".into(),
        });

        let submitter = LeadSubmitter::new(Some(Arc::new(mock.clone())), &config(true));
        let err = submitter.submit(&lead()).await.unwrap_err();
        assert!(matches!(err, ContactError::Delivery(msg) if msg.contains("Invalid API key")));
        mock.verify();
    }
}
