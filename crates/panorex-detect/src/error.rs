//! Error types for panorex-detect

use thiserror::Error;

/// Errors that can occur during luminance sampling
#[derive(Debug, Error)]
pub enum DetectError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] panorex_core::Error),

    /// Invalid sampling scale factor
    #[error("invalid sample scale: {0}")]
    InvalidScale(f32),
}

/// Result type for detection operations
pub type DetectResult<T> = Result<T, DetectError>;
