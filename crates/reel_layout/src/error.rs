//! Layout error types

use thiserror::Error;

/// Errors raised while building layout descriptions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The breakpoint expression could not be parsed
    #[error("invalid breakpoint expression '{0}'")]
    InvalidBreakpoint(String),

    /// A sticky track must be a positive, finite multiple of the viewport height
    #[error("invalid track height {0} (expected a positive multiple of the viewport height)")]
    InvalidTrackHeight(f32),

    /// A block length was negative or not finite
    #[error("invalid block length {0}")]
    InvalidLength(f32),

    /// Block names address offsets, so each may appear once
    #[error("document already has a block named '{0}'")]
    DuplicateBlock(String),

    /// A named block is not part of the document
    #[error("unknown document block '{0}'")]
    UnknownBlock(String),
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;
