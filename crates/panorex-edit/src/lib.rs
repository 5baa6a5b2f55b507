//! panorex-edit - Interactive selection editing
//!
//! This crate holds the presentation-facing half of the capture pipeline,
//! kept free of any actual presentation technology:
//!
//! - [`Viewport`] - letterbox/pillarbox-aware mapping between display
//!   pixels and normalized image coordinates
//! - [`QuadEditor`] / [`apply_drag`] - corner-at-a-time drag editing of the
//!   selection quad, plus reset-to-full-frame
//!
//! The rendering layer only needs to forward drag-begin / drag-move /
//! drag-end events with raw display coordinates and read back the quad for
//! overlay drawing.

pub mod editor;
pub mod viewport;

pub use editor::{QuadEditor, apply_drag};
pub use viewport::Viewport;
