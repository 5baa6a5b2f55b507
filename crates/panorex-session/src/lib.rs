//! panorex-session - Orchestration boundary of the capture pipeline
//!
//! Everything that touches the outside world lives here, keeping the
//! algorithmic crates pure:
//!
//! - [`FrameSource`] / [`CaptureSession`] - explicit capture lifecycle:
//!   snapshot once, stop the stream, detect, edit, confirm
//! - [`encode_frame_png`] / [`to_data_uri`] - the one outbound encoding
//!   path shared by every image that leaves the pipeline
//! - [`Classifier`] / [`classify_with_fallback`] - the external
//!   classification contract and the single documented recovery policy:
//!   one retry with the uncropped original frame

pub mod capture;
pub mod classify;
mod error;
pub mod outbound;

pub use capture::{CaptureSession, FrameSource};
pub use classify::{
    ClassificationRequest, ClassificationResponse, Classifier, Finding, classify_with_fallback,
};
pub use error::{ClassificationError, SessionError, SessionResult};
pub use outbound::{encode_frame_png, to_data_uri};
