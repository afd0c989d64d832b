//! Animation error types

use thiserror::Error;

/// Errors raised while building animation descriptions from text
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// The easing name is not recognized
    #[error("unknown easing curve '{0}'")]
    UnknownEasing(String),

    /// The easing name was recognized but its parameters were not
    #[error("invalid easing parameters in '{0}'")]
    InvalidEasingParameter(String),

    /// The property name is not animatable
    #[error("unknown property '{0}'")]
    UnknownProperty(String),

    /// The step position expression could not be parsed
    #[error("invalid timeline position '{0}'")]
    InvalidPosition(String),

    /// A step duration was negative or not finite
    #[error("invalid step duration {0}")]
    InvalidDuration(f32),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
