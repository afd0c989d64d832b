//! Core error types

use thiserror::Error;

/// Errors raised while constructing core values from host input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A width or height was negative, NaN or infinite
    #[error("invalid viewport dimension {name} = {value}")]
    InvalidDimension {
        /// Which dimension was rejected
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    /// A scroll offset was NaN or infinite
    #[error("invalid scroll offset {0}")]
    InvalidOffset(f32),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
