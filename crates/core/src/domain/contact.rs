use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::ValidationErrors;

pub const MIN_MESSAGE_CHARS: usize = 10;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAcknowledgement {
    pub success: bool,
    pub message: String,
}

impl ContactAcknowledgement {
    pub fn received() -> Self {
        Self {
            success: true,
            message: "Message received. We will get back to you soon.".to_string(),
        }
    }
}

/// Compiled once; a build failure is kept and reported on every use.
pub fn email_pattern() -> Result<&'static Regex, &'static regex::Error> {
    static EMAIL: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")).as_ref()
}

pub fn is_valid_email(candidate: &str) -> bool {
    match email_pattern() {
        Ok(pattern) => pattern.is_match(candidate),
        Err(error) => {
            error!(
                event_name = "contact.email_pattern.invalid",
                correlation_id = "validation",
                error = %error,
                "email pattern failed to compile; rejecting address"
            );
            false
        }
    }
}

impl ContactSubmission {
    /// Returns a trimmed copy, or every failing field at once.
    pub fn validate(&self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.is_empty() {
            errors.add("name", "Name is required");
        }

        if email.is_empty() {
            errors.add("email", "Email is required");
        } else if !is_valid_email(email) {
            errors.add("email", "Please enter a valid email address");
        }

        if message.is_empty() {
            errors.add("message", "Message is required");
        } else if message.chars().count() < MIN_MESSAGE_CHARS {
            errors.add("message", "Message must be at least 10 characters");
        }

        errors.into_result(Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }
}
