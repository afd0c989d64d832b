//! Story error types

use reel_animation::AnimationError;
use reel_layout::LayoutError;
use thiserror::Error;

/// Errors raised while assembling story sections
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoryError {
    #[error(transparent)]
    Animation(#[from] AnimationError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// No built-in section has this name
    #[error("unknown section '{0}'")]
    UnknownSection(String),

    /// A section was declared without any variant
    #[error("section '{0}' has no variants")]
    NoVariants(String),
}

/// Result type for story operations
pub type Result<T> = std::result::Result<T, StoryError>;
