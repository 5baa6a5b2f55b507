//! Error types for panorex-session

use thiserror::Error;

/// Error reported by the external classification collaborator
///
/// The transport and wire schema are owned by the collaborator; this type
/// only distinguishes "the service looked at the image and said no" from
/// everything else, because only the former drives the uncropped-frame
/// fallback.
#[derive(Debug, Error)]
pub enum ClassificationError {
    /// The service rejected the image (e.g. no structure recognized)
    #[error("image rejected: {0}")]
    Rejected(String),

    /// Transport or service failure
    #[error("classification failed: {0}")]
    Transport(String),
}

/// Errors that can occur during session orchestration
#[derive(Debug, Error)]
pub enum SessionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] panorex_core::Error),

    /// Warp error
    #[error("warp error: {0}")]
    Warp(#[from] panorex_warp::WarpError),

    /// Outbound image encoding failed
    #[error("encode error: {0}")]
    Encode(String),

    /// Capture device failure
    #[error("capture failed: {0}")]
    Capture(String),

    /// Classification failed even after the uncropped-frame fallback
    #[error(transparent)]
    Classification(#[from] ClassificationError),
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
