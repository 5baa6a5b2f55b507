//! Error types for panorex-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// Panorex core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid frame dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid channel count (only 3 and 4 are supported)
    #[error("invalid channel count: {0}")]
    InvalidChannels(u32),

    /// Raw data length does not match width * height * channels
    #[error("data size mismatch: expected {expected} bytes, got {actual}")]
    DataSizeMismatch { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Frame too small to be processed
    #[error("frame too small: {width}x{height}, need at least {min} px per side")]
    FrameTooSmall { width: u32, height: u32, min: u32 },
}

/// Result type alias for panorex core operations
pub type Result<T> = std::result::Result<T, Error>;
