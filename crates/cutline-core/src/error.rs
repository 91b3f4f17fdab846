//! Error types for Cutline.

use thiserror::Error;

/// Main error type for Cutline operations.
///
/// Validation of user-editable records is batch-and-report (`Vec<String>`);
/// this type covers the operations that genuinely fail.
#[derive(Error, Debug)]
pub enum CutlineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Timeline error: {0}")]
    Timeline(String),

    #[error("Effect error: {0}")]
    Effect(String),

    #[error("Transition error: {0}")]
    Transition(String),

    #[error("Audio error: {0}")]
    Audio(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for Cutline operations.
pub type Result<T> = std::result::Result<T, CutlineError>;
