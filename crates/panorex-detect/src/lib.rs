//! panorex-detect - Automatic boundary detection
//!
//! This crate locates the radiograph inside a captured frame:
//!
//! - [`LumaGrid`] - downsampled per-pixel luminance grid of the capture
//! - [`detect_boundary`] / [`detect_quad`] - two-hypothesis bounding-box
//!   detection (bright target on dark surround, or the reverse) with
//!   scoring and a hard-coded fallback quad
//!
//! The detected quad is a starting point for human correction in the
//! interactive editor, never a final answer, so the detection entry points
//! are total: a frame where nothing plausible is found still yields a
//! usable centered quad.

pub mod boundary;
mod error;
pub mod luminance;

pub use boundary::{
    Candidate, Detection, DetectorConfig, Polarity, detect_boundary, detect_quad, score,
    threshold_bbox,
};
pub use error::{DetectError, DetectResult};
pub use luminance::{DEFAULT_SCALE, LumaGrid, MIN_GRID_SIDE, luma};
