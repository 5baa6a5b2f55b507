//! Panorex Core - Basic data structures for the capture pipeline
//!
//! This crate provides the fundamental data structures used throughout the
//! panorex radiograph capture pipeline:
//!
//! - [`Frame`] / [`FrameMut`] - The captured image buffer (immutable / mutable)
//! - [`Point`] - Normalized 2D coordinates
//! - [`Quad`] / [`Corner`] - The ordered four-corner selection polygon
//!
//! Coordinates are normalized to `[0,1]` relative to the frame they refer
//! to, which keeps the selection independent of capture resolution and of
//! however the frame is scaled for display.

pub mod error;
pub mod frame;
pub mod geom;

pub use error::{Error, Result};
pub use frame::{Frame, FrameMut};
pub use geom::{Corner, Point, Quad};
