use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Per-field validation failures, keyed by the form field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// `Ok(value)` when nothing was recorded, otherwise the collected set.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> =
            self.0.iter().map(|(field, message)| format!("{field}: {message}")).collect();
        write!(f, "{}", rendered.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("Please enter a tracking number")]
    EmptyInput,
    #[error("No shipment found with this tracking number")]
    NotFound { tracking_number: String },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error("delivery failure: {0}")]
    Delivery(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, fields: ValidationErrors, correlation_id: String },
    #[error("not found: {message}")]
    NotFound { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::NotFound { .. } => "The requested shipment could not be found.",
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::NotFound { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }

    /// Malformed payloads that never reached domain validation.
    pub fn malformed(message: impl Into<String>, correlation_id: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            fields: ValidationErrors::default(),
            correlation_id: correlation_id.into(),
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::NotFound { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Validation(fields) => Self::BadRequest {
                message: "input validation failed".to_owned(),
                fields,
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Lookup(error @ LookupError::EmptyInput) => Self::BadRequest {
                message: error.to_string(),
                fields: ValidationErrors::default(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Lookup(error @ LookupError::NotFound { .. }) => {
                Self::NotFound { message: error.to_string(), correlation_id: "unassigned".to_owned() }
            }
            ApplicationError::Delivery(message) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{ApplicationError, InterfaceError, LookupError, ValidationErrors};

    #[test]
    fn validation_errors_map_to_bad_request_with_fields() {
        let mut fields = ValidationErrors::new();
        fields.add("weight", "Please enter valid weight");

        let interface = ApplicationError::from(fields).into_interface("req-1");

        match interface {
            InterfaceError::BadRequest { ref fields, ref correlation_id, .. } => {
                assert_eq!(correlation_id, "req-1");
                assert_eq!(fields.get("weight"), Some("Please enter valid weight"));
            }
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn empty_tracking_input_is_a_bad_request() {
        let interface = ApplicationError::from(LookupError::EmptyInput).into_interface("req-2");

        assert!(matches!(interface, InterfaceError::BadRequest { .. }));
        assert_eq!(
            interface.user_message(),
            "The request could not be processed. Check inputs and try again."
        );
    }

    #[test]
    fn unknown_tracking_number_maps_to_not_found() {
        let interface = ApplicationError::from(LookupError::NotFound {
            tracking_number: "UNKNOWN999".to_owned(),
        })
        .into_interface("req-3");

        assert!(matches!(interface, InterfaceError::NotFound { ref message, .. }
            if message == "No shipment found with this tracking number"));
        assert_eq!(interface.correlation_id(), "req-3");
    }

    #[test]
    fn delivery_error_maps_to_internal() {
        let interface =
            ApplicationError::Delivery("inbox unavailable".to_owned()).into_interface("req-4");

        assert!(matches!(interface, InterfaceError::Internal { .. }));
        assert_eq!(interface.user_message(), "An unexpected internal error occurred.");
    }

    #[test]
    fn validation_errors_render_every_field() {
        let mut fields = ValidationErrors::new();
        fields.add("speed", "Please select shipping speed");
        fields.add("originCity", "Please enter origin city/port");

        assert_eq!(fields.len(), 2);
        assert_eq!(
            fields.to_string(),
            "originCity: Please enter origin city/port; speed: Please select shipping speed"
        );
        assert!(fields.into_result(()).is_err());
        assert_eq!(ValidationErrors::new().into_result(7), Ok(7));
    }
}
