use chrono::{DateTime, Utc};

use crate::domain::{AttractionPass, FormField, PassId};

/// Transient advisory message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub issued_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            issued_at: Utc::now(),
        }
    }

    pub fn otp_sent() -> Self {
        Self::new(
            "OTP Sent!",
            "Please check your mobile for the verification code.",
        )
    }

    pub fn registration_successful() -> Self {
        Self::new("Registration Successful!", "Your code has been verified.")
    }

    pub fn pass_selected() -> Self {
        Self::new("Pass Selected!", "Your Attraction Pass has been activated.")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    FieldUpdated { field: FormField, value: String },
    OtpRequested,
    PassesResolved { passes: Vec<AttractionPass> },
    PassChosen { pass_id: PassId },
}

impl FlowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FlowEvent::FieldUpdated { .. } => "field_updated",
            FlowEvent::OtpRequested => "otp_requested",
            FlowEvent::PassesResolved { .. } => "passes_resolved",
            FlowEvent::PassChosen { .. } => "pass_chosen",
        }
    }
}
