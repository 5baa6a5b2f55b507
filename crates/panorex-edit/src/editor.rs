//! Interactive quad editing
//!
//! Drag handling is a pure fold over pointer events: the presentation layer
//! reports which corner a drag grabbed and where the pointer currently is in
//! display pixels; [`QuadEditor`] maps that through the [`Viewport`] and
//! replaces exactly one corner of the quad. No validation beyond per-axis
//! clamping happens here - non-convex and even degenerate shapes are legal
//! edits, and the homography solver downstream owns the degeneracy guard.

use crate::viewport::Viewport;
use panorex_core::{Corner, Point, Quad};

/// Replace one corner of a quad with a new normalized point.
///
/// Pure function; the input quad is unchanged and the other three corners
/// are copied verbatim. The new point is clamped into `[0,1]²`.
pub fn apply_drag(quad: Quad, corner: Corner, point: Point) -> Quad {
    let mut next = quad;
    next.set_corner(corner, point);
    next
}

/// Editing state for the selection quad
///
/// Owns the current [`Quad`] and the in-flight drag, if any. One editor
/// exists per capture; a new capture gets a fresh editor seeded from
/// boundary detection.
#[derive(Debug, Clone)]
pub struct QuadEditor {
    quad: Quad,
    active: Option<Corner>,
}

impl QuadEditor {
    /// Create an editor over an initial quad (usually the detection seed).
    pub fn new(quad: Quad) -> Self {
        Self { quad, active: None }
    }

    /// The current selection quad, for rendering handles and the overlay.
    #[inline]
    pub fn quad(&self) -> &Quad {
        &self.quad
    }

    /// Replace the quad wholesale (e.g. re-seeding after re-detection).
    pub fn set_quad(&mut self, quad: Quad) {
        self.quad = quad;
    }

    /// The corner currently being dragged, if any.
    #[inline]
    pub fn active_corner(&self) -> Option<Corner> {
        self.active
    }

    /// Begin dragging a corner.
    pub fn begin_drag(&mut self, corner: Corner) {
        self.active = Some(corner);
    }

    /// Move the active corner to a display position.
    ///
    /// Maps the position through the viewport and applies the drag. A move
    /// without an active drag is a no-op (stray pointer events are normal).
    pub fn drag_to(&mut self, viewport: &Viewport, screen_x: f32, screen_y: f32) {
        if let Some(corner) = self.active {
            self.quad = apply_drag(self.quad, corner, viewport.to_image(screen_x, screen_y));
        }
    }

    /// End the current drag.
    pub fn end_drag(&mut self) {
        self.active = None;
    }

    /// Reset the selection to the full frame.
    pub fn reset_to_full_frame(&mut self) {
        self.quad = Quad::full_frame();
        self.active = None;
    }
}

impl Default for QuadEditor {
    fn default() -> Self {
        Self::new(Quad::full_frame())
    }
}
