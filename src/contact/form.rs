//! Contact form state and the pre-filled subjects used by detail pages.

use crate::model::ContactLead;
use std::fmt::Display;

/// Call-to-action shortcuts that route a visitor to the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inquiry {
    RequestSwatches,
    SpecSheet,
}

impl Inquiry {
    pub fn subject_for(self, title: &str) -> String {
        format!("{self}: {title}")
    }
}

impl Display for Inquiry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Inquiry::RequestSwatches => write!(f, "Request Swatches"),
            Inquiry::SpecSheet => write!(f, "Spec Sheet"),
        }
    }
}

/// Field values of the contact form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// An empty form, with the subject taken from the routing hand-off if any.
    pub fn prefilled(subject: Option<&str>) -> Self {
        Self {
            subject: subject.unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    /// Names of required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn into_lead(self) -> ContactLead {
        ContactLead {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            subject: self.subject,
            message: self.message,
        }
    }
}

/// Clears the form after a submission the user was told succeeded.
pub fn reset(form: &mut ContactForm) {
    *form = ContactForm::default();
}
