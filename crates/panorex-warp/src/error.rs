//! Error types for panorex-warp

use thiserror::Error;

/// Errors that can occur during perspective warping
#[derive(Debug, Error)]
pub enum WarpError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] panorex_core::Error),

    /// Output dimensions must be positive
    #[error("invalid output size: {width}x{height}")]
    InvalidOutputSize { width: u32, height: u32 },
}

/// Result type for warp operations
pub type WarpResult<T> = Result<T, WarpError>;
