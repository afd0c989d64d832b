//! Lead capture error types

use thiserror::Error;

/// Errors raised while validating or delivering a lead
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LeadError {
    /// A required field was left blank
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The email address has no `@` or no dotted domain
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// A choice value that is not one of the offered options
    #[error("unknown {kind} '{value}'")]
    UnknownOption {
        /// Which choice list was searched
        kind: &'static str,
        /// The rejected value
        value: String,
    },

    /// The form was submitted already and has not been reset
    #[error("lead already submitted")]
    AlreadySubmitted,

    /// The record could not be encoded for delivery
    #[error("failed to encode lead record: {0}")]
    Encode(String),

    /// The sink refused the record
    #[error("lead delivery failed: {0}")]
    Delivery(String),
}

impl From<serde_json::Error> for LeadError {
    fn from(err: serde_json::Error) -> Self {
        LeadError::Encode(err.to_string())
    }
}

/// Result type for lead capture operations
pub type Result<T> = std::result::Result<T, LeadError>;
